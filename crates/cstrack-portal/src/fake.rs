//! In-memory [`Page`] for exercising the portal heuristics without a browser.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::PortalError;
use crate::page::{Locator, Page};
use crate::wait::Waits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FakeElement(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Goto(String),
    Click(String),
    Typed(String, String),
    Forced(String, String),
}

#[derive(Default)]
struct Dom {
    url: String,
    texts: Vec<String>,
    matches: HashMap<String, Vec<FakeElement>>,
    children: HashMap<(FakeElement, String), Vec<FakeElement>>,
    unclickable: HashSet<FakeElement>,
    failing: HashSet<String>,
    navigate_on_click: HashMap<FakeElement, String>,
    mount_on_click: HashMap<FakeElement, Vec<(String, FakeElement)>>,
    events: Vec<Event>,
}

/// Elements are registered against the exact locator strings the portal code
/// asks for; an element's text doubles as its name in the event log.
///
/// Creation order stands in for document order. A CSS selector list
/// (`a, b`) matches the union of its parts in that order, without duplicates.
pub struct FakePage {
    dom: Mutex<Dom>,
    closed: Arc<AtomicBool>,
}

pub fn quick_waits() -> Waits {
    Waits {
        login: Duration::from_millis(40),
        element: Duration::from_millis(40),
        poll: Duration::from_millis(5),
        menu_settle: Duration::ZERO,
        search_settle: Duration::ZERO,
    }
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            dom: Mutex::new(Dom::default()),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn dom(&self) -> std::sync::MutexGuard<'_, Dom> {
        self.dom.lock().expect("fake dom lock poisoned")
    }

    pub fn element(&self, text: &str) -> FakeElement {
        let mut dom = self.dom();
        dom.texts.push(text.to_owned());
        FakeElement(dom.texts.len() - 1)
    }

    pub fn mount(&self, locator: &Locator, element: &FakeElement) {
        self.dom()
            .matches
            .entry(locator.to_string())
            .or_default()
            .push(*element);
    }

    pub fn mount_in(&self, parent: &FakeElement, locator: &Locator, element: &FakeElement) {
        self.dom()
            .children
            .entry((*parent, locator.to_string()))
            .or_default()
            .push(*element);
    }

    pub fn set_unclickable(&self, element: &FakeElement) {
        self.dom().unclickable.insert(*element);
    }

    pub fn fail_lookup(&self, locator: &Locator) {
        self.dom().failing.insert(locator.to_string());
    }

    pub fn navigate_on_click(&self, element: &FakeElement, url: &str) {
        self.dom()
            .navigate_on_click
            .insert(*element, url.to_owned());
    }

    pub fn mount_on_click(&self, trigger: &FakeElement, locator: &Locator, element: &FakeElement) {
        self.dom()
            .mount_on_click
            .entry(*trigger)
            .or_default()
            .push((locator.to_string(), *element));
    }

    pub fn events(&self) -> Vec<Event> {
        self.dom().events.clone()
    }

    pub fn clicked(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Click(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    fn name(dom: &Dom, element: FakeElement) -> String {
        dom.texts[element.0].clone()
    }
}

#[async_trait]
impl Page for FakePage {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<(), PortalError> {
        let mut dom = self.dom();
        dom.url = url.to_owned();
        dom.events.push(Event::Goto(url.to_owned()));
        Ok(())
    }

    async fn current_url(&self) -> Result<String, PortalError> {
        Ok(self.dom().url.clone())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<FakeElement>, PortalError> {
        let dom = self.dom();
        let key = locator.to_string();
        if dom.failing.contains(&key) {
            return Err(PortalError::Lookup {
                locator: key,
                reason: "simulated driver failure".to_owned(),
            });
        }
        if let Locator::Css(selector) = locator {
            if selector.contains(',') {
                let mut found: Vec<FakeElement> = selector
                    .split(',')
                    .filter_map(|part| dom.matches.get(&Locator::css(part.trim()).to_string()))
                    .flatten()
                    .copied()
                    .collect();
                found.sort_unstable();
                found.dedup();
                return Ok(found);
            }
        }
        Ok(dom.matches.get(&key).cloned().unwrap_or_default())
    }

    async fn find_all_in(
        &self,
        parent: &FakeElement,
        locator: &Locator,
    ) -> Result<Vec<FakeElement>, PortalError> {
        let dom = self.dom();
        Ok(dom
            .children
            .get(&(*parent, locator.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn text(&self, element: &FakeElement) -> Result<String, PortalError> {
        Ok(Self::name(&self.dom(), *element))
    }

    async fn is_clickable(&self, element: &FakeElement) -> Result<bool, PortalError> {
        Ok(!self.dom().unclickable.contains(element))
    }

    async fn click(&self, element: &FakeElement) -> Result<(), PortalError> {
        let mut dom = self.dom();
        let name = Self::name(&dom, *element);
        dom.events.push(Event::Click(name));
        if let Some(url) = dom.navigate_on_click.get(element).cloned() {
            dom.url = url;
        }
        if let Some(mounts) = dom.mount_on_click.remove(element) {
            for (key, revealed) in mounts {
                dom.matches.entry(key).or_default().push(revealed);
            }
        }
        Ok(())
    }

    async fn type_into(&self, element: &FakeElement, text: &str) -> Result<(), PortalError> {
        let mut dom = self.dom();
        let name = Self::name(&dom, *element);
        dom.events.push(Event::Typed(name, text.to_owned()));
        Ok(())
    }

    async fn force_value(&self, element: &FakeElement, value: &str) -> Result<(), PortalError> {
        let mut dom = self.dom();
        let name = Self::name(&dom, *element);
        dom.events.push(Event::Forced(name, value.to_owned()));
        Ok(())
    }

    async fn close(self) -> Result<(), PortalError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
