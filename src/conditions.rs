//! Ready-made [`Condition`]s for the waits scripts actually write.
//!
//! Each is a thin probe over the [`Driver`] contract: locate something, check one
//! piece of its state, and report either the value or a recoverable miss. A miss is
//! always a [`NotFound`](crate::error::ErrorKind::NotFound)-kind error, including
//! "present but not yet visible" and "present but not yet enabled", so the default
//! ignored set keeps polling for it.

use crate::driver::{Driver, Element};
use crate::error::DriverError;
use crate::wait::Condition;
use crate::Locator;
use url::Url;

/// Waits for the first element matching `search` to be present.
pub fn element_located(search: Locator<'_>) -> ElementLocated<'_> {
    ElementLocated { search }
}

/// See [`element_located`].
#[derive(Clone, Copy, Debug)]
pub struct ElementLocated<'a> {
    search: Locator<'a>,
}

impl<'a, D: Driver> Condition<D> for ElementLocated<'a> {
    type Output = D::Elem;

    async fn poll(&mut self, driver: &mut D) -> Result<D::Elem, DriverError> {
        driver.locate(self.search).await
    }
}

/// Waits for an element matching `search` to be present *and* displayed.
pub fn element_visible(search: Locator<'_>) -> ElementVisible<'_> {
    ElementVisible { search }
}

/// See [`element_visible`].
#[derive(Clone, Copy, Debug)]
pub struct ElementVisible<'a> {
    search: Locator<'a>,
}

impl<'a, D: Driver> Condition<D> for ElementVisible<'a> {
    type Output = D::Elem;

    async fn poll(&mut self, driver: &mut D) -> Result<D::Elem, DriverError> {
        let mut elem = driver.locate(self.search).await?;
        if elem.is_displayed().await? {
            Ok(elem)
        } else {
            Err(DriverError::not_found(format!(
                "element {} is present but not displayed",
                self.search
            )))
        }
    }
}

/// Waits for an element matching `search` to be present, displayed, and enabled.
pub fn element_clickable(search: Locator<'_>) -> ElementClickable<'_> {
    ElementClickable { search }
}

/// See [`element_clickable`].
#[derive(Clone, Copy, Debug)]
pub struct ElementClickable<'a> {
    search: Locator<'a>,
}

impl<'a, D: Driver> Condition<D> for ElementClickable<'a> {
    type Output = D::Elem;

    async fn poll(&mut self, driver: &mut D) -> Result<D::Elem, DriverError> {
        let mut elem = driver.locate(self.search).await?;
        if !elem.is_displayed().await? {
            return Err(DriverError::not_found(format!(
                "element {} is present but not displayed",
                self.search
            )));
        }
        if !elem.is_enabled().await? {
            return Err(DriverError::not_found(format!(
                "element {} is displayed but not enabled",
                self.search
            )));
        }
        Ok(elem)
    }
}

/// Waits for an element matching `search` to be selected, as a checkbox or radio
/// button becomes once clicked.
pub fn element_selected(search: Locator<'_>) -> ElementSelected<'_> {
    ElementSelected { search }
}

/// See [`element_selected`].
#[derive(Clone, Copy, Debug)]
pub struct ElementSelected<'a> {
    search: Locator<'a>,
}

impl<'a, D: Driver> Condition<D> for ElementSelected<'a> {
    type Output = D::Elem;

    async fn poll(&mut self, driver: &mut D) -> Result<D::Elem, DriverError> {
        let mut elem = driver.locate(self.search).await?;
        if elem.is_selected().await? {
            Ok(elem)
        } else {
            Err(DriverError::not_found(format!(
                "element {} is present but not selected",
                self.search
            )))
        }
    }
}

/// Waits for at least one element matching `search`, and yields all matches.
///
/// Useful for suggestion lists and other collections that fill in asynchronously.
pub fn elements_located(search: Locator<'_>) -> ElementsLocated<'_> {
    ElementsLocated { search }
}

/// See [`elements_located`].
#[derive(Clone, Copy, Debug)]
pub struct ElementsLocated<'a> {
    search: Locator<'a>,
}

impl<'a, D: Driver> Condition<D> for ElementsLocated<'a> {
    type Output = Vec<D::Elem>;

    async fn poll(&mut self, driver: &mut D) -> Result<Vec<D::Elem>, DriverError> {
        let elems = driver.locate_all(self.search).await?;
        if elems.is_empty() {
            Err(DriverError::not_found(format!(
                "no elements matching {}",
                self.search
            )))
        } else {
            Ok(elems)
        }
    }
}

/// Waits for the text of the element matching `search` to contain `needle`, and
/// yields the full text.
pub fn text_present<'a>(search: Locator<'a>, needle: &'a str) -> TextPresent<'a> {
    TextPresent { search, needle }
}

/// See [`text_present`].
#[derive(Clone, Copy, Debug)]
pub struct TextPresent<'a> {
    search: Locator<'a>,
    needle: &'a str,
}

impl<'a, D: Driver> Condition<D> for TextPresent<'a> {
    type Output = String;

    async fn poll(&mut self, driver: &mut D) -> Result<String, DriverError> {
        let mut elem = driver.locate(self.search).await?;
        let text = elem.text().await?;
        if text.contains(self.needle) {
            Ok(text)
        } else {
            Err(DriverError::not_found(format!(
                "element {} does not yet contain `{}`",
                self.search, self.needle
            )))
        }
    }
}

/// Waits for the element matching `search` to carry the attribute `name`, and
/// yields its value.
pub fn attribute_present<'a>(search: Locator<'a>, name: &'a str) -> AttributePresent<'a> {
    AttributePresent { search, name }
}

/// See [`attribute_present`].
#[derive(Clone, Copy, Debug)]
pub struct AttributePresent<'a> {
    search: Locator<'a>,
    name: &'a str,
}

impl<'a, D: Driver> Condition<D> for AttributePresent<'a> {
    type Output = String;

    async fn poll(&mut self, driver: &mut D) -> Result<String, DriverError> {
        let mut elem = driver.locate(self.search).await?;
        match elem.attr(self.name).await? {
            Some(value) => Ok(value),
            None => Err(DriverError::not_found(format!(
                "element {} has no attribute `{}` yet",
                self.search, self.name
            ))),
        }
    }
}

/// Waits for the session's current URL to equal `url`, as after a navigation
/// settles.
pub fn url_is(url: Url) -> UrlIs {
    UrlIs { url }
}

/// See [`url_is`].
#[derive(Clone, Debug)]
pub struct UrlIs {
    url: Url,
}

impl<D: Driver> Condition<D> for UrlIs {
    type Output = ();

    async fn poll(&mut self, driver: &mut D) -> Result<(), DriverError> {
        let current = driver.current_url().await?;
        if current == self.url {
            Ok(())
        } else {
            Err(DriverError::not_found(format!(
                "current url is `{}`, not `{}`",
                current, self.url
            )))
        }
    }
}

/// Waits for an alert to be open, and yields its text.
pub fn alert_present() -> AlertPresent {
    AlertPresent { _priv: () }
}

/// See [`alert_present`].
#[derive(Clone, Copy, Debug)]
pub struct AlertPresent {
    _priv: (),
}

impl<D: Driver> Condition<D> for AlertPresent {
    type Output = String;

    async fn poll(&mut self, driver: &mut D) -> Result<String, DriverError> {
        driver.alert_text().await
    }
}
