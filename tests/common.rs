#![allow(dead_code)]

//! A scripted in-memory driver for exercising waits without a browser.
//!
//! Elements are installed under their locator's display form together with a small
//! script: how many lookups miss before the element is present, how many probes
//! report it hidden or disabled, how many clicks bounce off it. The driver is a
//! cheap-clone handle, so tests can keep one for inspection after moving another
//! into a session.

use attesa::driver::{Driver, Element};
use attesa::error::DriverError;
use attesa::Locator;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

/// What one fake element does as it is probed.
#[derive(Clone, Debug, Default)]
pub struct ElemScript {
    /// Lookups that miss before the element is present.
    pub present_after: u32,
    /// `is_displayed` probes that report false before true.
    pub displayed_after: u32,
    /// `is_enabled` probes that report false before true.
    pub enabled_after: u32,
    /// Clicks that fail not-interactable before one lands.
    pub clickable_after: u32,
    /// Initial selected state.
    pub selected: bool,
    /// How many handles a `locate_all` yields once present.
    pub copies: u32,
    /// Rendered text.
    pub text: String,
    /// Attributes present on the element.
    pub attrs: HashMap<String, String>,
}

impl ElemScript {
    pub fn new() -> Self {
        ElemScript {
            copies: 1,
            ..ElemScript::default()
        }
    }

    pub fn present_after(mut self, misses: u32) -> Self {
        self.present_after = misses;
        self
    }

    pub fn displayed_after(mut self, probes: u32) -> Self {
        self.displayed_after = probes;
        self
    }

    pub fn enabled_after(mut self, probes: u32) -> Self {
        self.enabled_after = probes;
        self
    }

    pub fn clickable_after(mut self, bounces: u32) -> Self {
        self.clickable_after = bounces;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn copies(mut self, copies: u32) -> Self {
        self.copies = copies;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }
}

#[derive(Debug)]
struct ElemState {
    script: ElemScript,
    locate_tries: u32,
    displayed_checks: u32,
    enabled_checks: u32,
    click_tries: u32,
    clicks: u32,
    keys: String,
    selected: bool,
}

impl ElemState {
    fn new(script: ElemScript) -> Self {
        let selected = script.selected;
        ElemState {
            script,
            locate_tries: 0,
            displayed_checks: 0,
            enabled_checks: 0,
            click_tries: 0,
            clicks: 0,
            keys: String::new(),
            selected,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    elements: HashMap<String, ElemState>,
    url: Option<Url>,
    alert: Option<String>,
    accepted: Vec<String>,
    dismissed: Vec<String>,
    locate_calls: u32,
    back_calls: u32,
    refresh_calls: u32,
    close_calls: u32,
    terminated: bool,
    closed: bool,
}

/// Handle to one scripted session.
#[derive(Clone, Debug)]
pub struct FakeDriver {
    inner: Arc<Mutex<Inner>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        FakeDriver {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn install(&self, search: Locator<'_>, script: ElemScript) {
        self.inner
            .lock()
            .unwrap()
            .elements
            .insert(search.to_string(), ElemState::new(script));
    }

    pub fn set_alert(&self, text: &str) {
        self.inner.lock().unwrap().alert = Some(text.to_string());
    }

    pub fn set_selected(&self, search: Locator<'_>, selected: bool) {
        let mut inner = self.inner.lock().unwrap();
        let state = inner.elements.get_mut(&search.to_string()).unwrap();
        state.selected = selected;
    }

    /// Simulate the browser or driver dying out from under the session.
    pub fn terminate(&self) {
        self.inner.lock().unwrap().terminated = true;
    }

    pub fn locate_calls(&self) -> u32 {
        self.inner.lock().unwrap().locate_calls
    }

    pub fn clicks(&self, search: Locator<'_>) -> u32 {
        self.inner.lock().unwrap().elements[&search.to_string()].clicks
    }

    pub fn keys(&self, search: Locator<'_>) -> String {
        self.inner.lock().unwrap().elements[&search.to_string()]
            .keys
            .clone()
    }

    pub fn closed(&self) -> bool {
        self.inner.lock().unwrap().closed
    }

    pub fn close_calls(&self) -> u32 {
        self.inner.lock().unwrap().close_calls
    }

    pub fn accepted_alerts(&self) -> Vec<String> {
        self.inner.lock().unwrap().accepted.clone()
    }

    pub fn dismissed_alerts(&self) -> Vec<String> {
        self.inner.lock().unwrap().dismissed.clone()
    }

    fn element(&self, key: &str) -> FakeElement {
        FakeElement {
            key: key.to_string(),
            inner: Arc::clone(&self.inner),
        }
    }
}

fn gone() -> DriverError {
    DriverError::session_terminated("the scripted session was terminated")
}

impl Driver for FakeDriver {
    type Elem = FakeElement;

    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.terminated {
            return Err(gone());
        }
        inner.url = Some(Url::parse(url).expect("fake driver given an invalid url"));
        Ok(())
    }

    async fn back(&mut self) -> Result<(), DriverError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.terminated {
            return Err(gone());
        }
        inner.back_calls += 1;
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), DriverError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.terminated {
            return Err(gone());
        }
        inner.refresh_calls += 1;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<Url, DriverError> {
        let inner = self.inner.lock().unwrap();
        if inner.terminated {
            return Err(gone());
        }
        Ok(inner
            .url
            .clone()
            .unwrap_or_else(|| Url::parse("about:blank").unwrap()))
    }

    async fn locate(&mut self, search: Locator<'_>) -> Result<FakeElement, DriverError> {
        let key = search.to_string();
        let mut inner = self.inner.lock().unwrap();
        if inner.terminated {
            return Err(gone());
        }
        inner.locate_calls += 1;
        let appeared = match inner.elements.get_mut(&key) {
            Some(state) => {
                state.locate_tries += 1;
                state.locate_tries > state.script.present_after
            }
            None => false,
        };
        drop(inner);
        if appeared {
            Ok(self.element(&key))
        } else {
            Err(DriverError::not_found(format!(
                "no element matching {}",
                search
            )))
        }
    }

    async fn locate_all(&mut self, search: Locator<'_>) -> Result<Vec<FakeElement>, DriverError> {
        let key = search.to_string();
        let mut inner = self.inner.lock().unwrap();
        if inner.terminated {
            return Err(gone());
        }
        inner.locate_calls += 1;
        let copies = match inner.elements.get_mut(&key) {
            Some(state) => {
                state.locate_tries += 1;
                if state.locate_tries > state.script.present_after {
                    state.script.copies
                } else {
                    0
                }
            }
            None => 0,
        };
        drop(inner);
        Ok((0..copies).map(|_| self.element(&key)).collect())
    }

    async fn alert_text(&mut self) -> Result<String, DriverError> {
        let inner = self.inner.lock().unwrap();
        if inner.terminated {
            return Err(gone());
        }
        inner
            .alert
            .clone()
            .ok_or_else(|| DriverError::not_found("no alert is currently open"))
    }

    async fn accept_alert(&mut self) -> Result<(), DriverError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.terminated {
            return Err(gone());
        }
        match inner.alert.take() {
            Some(text) => {
                inner.accepted.push(text);
                Ok(())
            }
            None => Err(DriverError::not_found("no alert is currently open")),
        }
    }

    async fn dismiss_alert(&mut self) -> Result<(), DriverError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.terminated {
            return Err(gone());
        }
        match inner.alert.take() {
            Some(text) => {
                inner.dismissed.push(text);
                Ok(())
            }
            None => Err(DriverError::not_found("no alert is currently open")),
        }
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        let mut inner = self.inner.lock().unwrap();
        inner.close_calls += 1;
        inner.closed = true;
        Ok(())
    }
}

/// Handle to one scripted element.
#[derive(Clone, Debug)]
pub struct FakeElement {
    key: String,
    inner: Arc<Mutex<Inner>>,
}

impl FakeElement {
    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut ElemState) -> Result<T, DriverError>,
    ) -> Result<T, DriverError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.terminated {
            return Err(gone());
        }
        match inner.elements.get_mut(&self.key) {
            Some(state) => f(state),
            None => Err(DriverError::not_found(format!(
                "element {} is no longer attached",
                self.key
            ))),
        }
    }
}

impl Element for FakeElement {
    async fn is_displayed(&mut self) -> Result<bool, DriverError> {
        self.with_state(|state| {
            state.displayed_checks += 1;
            Ok(state.displayed_checks > state.script.displayed_after)
        })
    }

    async fn is_enabled(&mut self) -> Result<bool, DriverError> {
        self.with_state(|state| {
            state.enabled_checks += 1;
            Ok(state.enabled_checks > state.script.enabled_after)
        })
    }

    async fn is_selected(&mut self) -> Result<bool, DriverError> {
        self.with_state(|state| Ok(state.selected))
    }

    async fn text(&mut self) -> Result<String, DriverError> {
        self.with_state(|state| Ok(state.script.text.clone()))
    }

    async fn attr(&mut self, name: &str) -> Result<Option<String>, DriverError> {
        self.with_state(|state| Ok(state.script.attrs.get(name).cloned()))
    }

    async fn click(&mut self) -> Result<(), DriverError> {
        let key = self.key.clone();
        self.with_state(|state| {
            state.click_tries += 1;
            if state.click_tries > state.script.clickable_after {
                state.clicks += 1;
                Ok(())
            } else {
                Err(DriverError::not_interactable(format!(
                    "element {} is currently obscured",
                    key
                )))
            }
        })
    }

    async fn send_keys(&mut self, text: &str) -> Result<(), DriverError> {
        self.with_state(|state| {
            state.keys.push_str(text);
            Ok(())
        })
    }

    async fn clear(&mut self) -> Result<(), DriverError> {
        self.with_state(|state| {
            state.keys.clear();
            Ok(())
        })
    }
}
