/// A statistics page on the portal and the label of the counter read from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Short name used in logs and errors.
    pub name: &'static str,
    /// Menu entries to click, outermost first.
    pub menu_path: &'static [&'static str],
    /// Spellings of the total's row/column label as the portal renders it.
    pub labels: &'static [&'static str],
}

/// 통계 리포트 > CS 통계 > Q&A 통계, "총 접수건" (total received).
pub const QA_REPORT: Report = Report {
    name: "qa",
    menu_path: &["통계 리포트", "CS 통계", "Q&A 통계"],
    labels: &["총 접수건", "총접수건"],
};

/// 통계 리포트 > 콜센터 > 콜센터 연결률 통계, "총인바운드콜" (total inbound calls).
pub const INBOUND_CALL_REPORT: Report = Report {
    name: "inbound_calls",
    menu_path: &["통계 리포트", "콜센터", "콜센터 연결률 통계"],
    labels: &["총인바운드콜", "총 인바운드콜"],
};
