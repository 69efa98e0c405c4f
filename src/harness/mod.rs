//! Interactive scenes that can be switched between at runtime.
//!
//! A [`TestHarness`] starts out showing a menu with one button per registered
//! test. Clicking one constructs that test and runs it until the `<-` button
//! takes the harness back to the menu, dropping the test along with any GL
//! objects it owned.

mod clear_color;
mod texture_2d;

pub use self::{clear_color::ClearColor, texture_2d::Texture2D};

use crate::renderer::Renderer;
use anyhow::anyhow;

/// A scene the harness can run. Everything has an empty default, so a test
/// only implements the parts it cares about.
pub trait Test {
    fn on_update(&mut self, _delta_time: f32) {}

    fn on_render(&mut self, _renderer: &Renderer) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_imgui_render(&mut self, _ui: &imgui::Ui) {}
}

type Constructor<C> = Box<dyn Fn(&C) -> anyhow::Result<Box<dyn Test>>>;

/// The registered tests, in registration order. `C` is whatever the tests
/// need to be built, usually the GL [`Context`](crate::gl_api::Context).
pub struct TestMenu<C> {
    tests: Vec<(String, Constructor<C>)>,
}

impl<C> Default for TestMenu<C> {
    fn default() -> Self {
        TestMenu { tests: Vec::new() }
    }
}

impl<C> TestMenu<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T, F>(&mut self, name: &str, constructor: F) -> &mut Self
    where
        T: Test + 'static,
        F: Fn(&C) -> anyhow::Result<T> + 'static,
    {
        log::debug!("registering test `{}`", name);
        self.tests.push((
            name.into(),
            Box::new(move |arg| Ok(Box::new(constructor(arg)?) as Box<dyn Test>)),
        ));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tests.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn create(&self, name: &str, arg: &C) -> anyhow::Result<Box<dyn Test>> {
        let (_, constructor) = self
            .tests
            .iter()
            .find(|(test, _)| test == name)
            .ok_or_else(|| anyhow!("no test named `{}`", name))?;
        constructor(arg)
    }

    /// Draws a button per test, returning the name of the one that was
    /// clicked this frame.
    pub fn on_imgui_render(&self, ui: &imgui::Ui) -> Option<&str> {
        let mut clicked = None;
        for name in self.names() {
            if ui.button(name) {
                clicked = Some(name);
            }
        }
        clicked
    }
}

struct ActiveTest {
    name: String,
    test: Box<dyn Test>,
}

/// Owns the menu and whichever test is running.
pub struct TestHarness<C> {
    menu: TestMenu<C>,
    arg: C,
    current: Option<ActiveTest>,
}

impl<C> TestHarness<C> {
    pub fn new(menu: TestMenu<C>, arg: C) -> Self {
        TestHarness {
            menu,
            arg,
            current: None,
        }
    }

    pub fn menu(&self) -> &TestMenu<C> {
        &self.menu
    }

    /// Name of the running test, or `None` while the menu is showing.
    pub fn current(&self) -> Option<&str> {
        self.current.as_ref().map(|active| active.name.as_str())
    }

    /// Builds the named test and makes it the current one. If building fails
    /// the harness stays where it was.
    pub fn select(&mut self, name: &str) -> anyhow::Result<()> {
        let test = self.menu.create(name, &self.arg)?;
        log::info!("starting test `{}`", name);
        self.current = Some(ActiveTest {
            name: name.into(),
            test,
        });
        Ok(())
    }

    /// Drops the running test and goes back to the menu.
    pub fn back(&mut self) {
        if let Some(active) = self.current.take() {
            log::info!("leaving test `{}`", active.name);
        }
    }

    pub fn on_update(&mut self, delta_time: f32) {
        if let Some(active) = &mut self.current {
            active.test.on_update(delta_time);
        }
    }

    pub fn on_render(&mut self, renderer: &Renderer) -> anyhow::Result<()> {
        match &mut self.current {
            Some(active) => active.test.on_render(renderer),
            None => Ok(()),
        }
    }

    /// The `Test` window: a way back plus the test's own controls while a
    /// test is running, the menu otherwise.
    pub fn on_imgui_render(&mut self, ui: &imgui::Ui) {
        let mut go_back = false;
        let mut selected = None;

        ui.window("Test").build(|| match &mut self.current {
            Some(active) => {
                if ui.button("<-") {
                    go_back = true;
                } else {
                    active.test.on_imgui_render(ui);
                }
            }
            None => selected = self.menu.on_imgui_render(ui).map(String::from),
        });

        if go_back {
            self.back();
        }
        if let Some(name) = selected {
            if let Err(err) = self.select(&name) {
                log::error!("could not start test `{}`: {:#}", name, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl Test for Recorder {
        fn on_update(&mut self, delta_time: f32) {
            self.log
                .borrow_mut()
                .push(format!("{} update {}", self.name, delta_time));
        }
    }

    impl Drop for Recorder {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("{} dropped", self.name));
        }
    }

    struct Broken;
    impl Test for Broken {}

    fn harness(log: &Log) -> TestHarness<Log> {
        let mut menu = TestMenu::new();
        menu.register("First", |log: &Log| {
            Ok(Recorder {
                name: "first",
                log: log.clone(),
            })
        })
        .register("Second", |log: &Log| {
            Ok(Recorder {
                name: "second",
                log: log.clone(),
            })
        })
        .register("Broken", |_: &Log| -> anyhow::Result<Broken> {
            Err(anyhow!("missing texture"))
        });

        TestHarness::new(menu, log.clone())
    }

    #[test]
    fn menu_keeps_registration_order() {
        let log = Log::default();
        let harness = harness(&log);

        let names: Vec<_> = harness.menu().names().collect();
        assert_eq!(names, vec!["First", "Second", "Broken"]);
        assert_eq!(harness.menu().len(), 3);
    }

    #[test]
    fn starts_in_the_menu() {
        let log = Log::default();
        let mut harness = harness(&log);

        assert_eq!(harness.current(), None);
        harness.on_update(0.5);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn selected_test_gets_updates() {
        let log = Log::default();
        let mut harness = harness(&log);

        harness.select("Second").unwrap();
        assert_eq!(harness.current(), Some("Second"));

        harness.on_update(0.25);
        assert_eq!(*log.borrow(), vec!["second update 0.25"]);
    }

    #[test]
    fn going_back_drops_the_test() {
        let log = Log::default();
        let mut harness = harness(&log);

        harness.select("First").unwrap();
        harness.back();

        assert_eq!(harness.current(), None);
        assert_eq!(*log.borrow(), vec!["first dropped"]);

        // back from the menu is a no-op
        harness.back();
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn switching_replaces_the_previous_test() {
        let log = Log::default();
        let mut harness = harness(&log);

        harness.select("First").unwrap();
        harness.select("Second").unwrap();

        assert_eq!(harness.current(), Some("Second"));
        assert_eq!(*log.borrow(), vec!["first dropped"]);
    }

    #[test]
    fn failed_construction_keeps_current_test() {
        let log = Log::default();
        let mut harness = harness(&log);

        harness.select("First").unwrap();
        let err = harness.select("Broken").unwrap_err();

        assert_eq!(err.to_string(), "missing texture");
        assert_eq!(harness.current(), Some("First"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unknown_names_are_errors() {
        let log = Log::default();
        let mut harness = harness(&log);

        let err = harness.select("Third").unwrap_err();
        assert_eq!(err.to_string(), "no test named `Third`");
        assert_eq!(harness.current(), None);
    }
}
