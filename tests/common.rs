#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use protocol_compat::{
    CompatibilityFacade, ExternalVersionProvider, HostUiSystem, ProviderFault, ProviderResult,
    RawVersion, UiSurface, VersionChangeCallback,
};

/// How the fake provider answers every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    Healthy,
    Faulting,
    Panicking,
    Uninitialized,
}

/// In-memory provider that records the commands it receives.
pub struct FakeProvider {
    pub behavior: Cell<Behavior>,
    pub protocols: Vec<RawVersion>,
    pub current: RefCell<RawVersion>,
    pub set_target_calls: RefCell<Vec<RawVersion>>,
    pub opened_on: RefCell<Vec<UiSurface>>,
    pub callbacks: RefCell<Vec<VersionChangeCallback>>,
}

impl FakeProvider {
    pub fn new(protocols: Vec<RawVersion>, current: RawVersion) -> Self {
        Self {
            behavior: Cell::new(Behavior::Healthy),
            protocols,
            current: RefCell::new(current),
            set_target_calls: RefCell::new(Vec::new()),
            opened_on: RefCell::new(Vec::new()),
            callbacks: RefCell::new(Vec::new()),
        }
    }

    pub fn with_behavior(self, behavior: Behavior) -> Self {
        self.behavior.set(behavior);
        self
    }

    pub fn current_id(&self) -> i32 {
        self.current.borrow().id
    }

    fn check(&self) -> ProviderResult<()> {
        match self.behavior.get() {
            Behavior::Healthy | Behavior::Uninitialized => Ok(()),
            Behavior::Faulting => Err(ProviderFault::new("subsystem exploded")),
            Behavior::Panicking => panic!("provider internals changed"),
        }
    }
}

impl ExternalVersionProvider for FakeProvider {
    fn is_initialized(&self) -> bool {
        self.behavior.get() != Behavior::Uninitialized
    }

    fn current_target(&self) -> ProviderResult<RawVersion> {
        self.check()?;
        Ok(self.current.borrow().clone())
    }

    fn registered_protocols(&self) -> ProviderResult<Vec<RawVersion>> {
        self.check()?;
        Ok(self.protocols.clone())
    }

    fn is_registered(&self, id: i32) -> ProviderResult<bool> {
        self.check()?;
        Ok(self.protocols.iter().any(|version| version.id == id))
    }

    fn protocol_by_id(&self, id: i32) -> ProviderResult<RawVersion> {
        self.check()?;
        self.protocols
            .iter()
            .find(|version| version.id == id)
            .cloned()
            .ok_or_else(|| ProviderFault::new(format!("no protocol {id}")))
    }

    fn set_current_target(&self, version: RawVersion) -> ProviderResult<()> {
        self.check()?;
        self.set_target_calls.borrow_mut().push(version.clone());
        let previous = self.current.replace(version.clone());
        for callback in self.callbacks.borrow().iter() {
            callback(&previous, &version);
        }
        Ok(())
    }

    fn open_protocol_selection(&self, parent: &UiSurface) -> ProviderResult<()> {
        self.check()?;
        self.opened_on.borrow_mut().push(parent.clone());
        Ok(())
    }

    fn register_change_callback(&self, callback: VersionChangeCallback) -> ProviderResult<()> {
        self.check()?;
        self.callbacks.borrow_mut().push(callback);
        Ok(())
    }
}

/// Host UI with an optional active surface and a construction counter.
#[derive(Default)]
pub struct FakeUi {
    pub active: RefCell<Option<UiSurface>>,
    pub default_surfaces_built: Cell<usize>,
}

impl FakeUi {
    pub fn with_active(surface: UiSurface) -> Self {
        Self {
            active: RefCell::new(Some(surface)),
            default_surfaces_built: Cell::new(0),
        }
    }
}

impl HostUiSystem for FakeUi {
    fn active_surface(&self) -> Option<UiSurface> {
        self.active.borrow().clone()
    }

    fn create_default_surface(&self) -> UiSurface {
        self.default_surfaces_built
            .set(self.default_surfaces_built.get() + 1);
        UiSurface::new(0, "title")
    }
}

/// Release protocols 1.8, 1.9.4 and 1.12.2 plus a legacy and a snapshot entry,
/// oldest first.
pub fn sample_protocols() -> Vec<RawVersion> {
    use protocol_compat::ReleaseChannel;

    vec![
        RawVersion::new("1.6.4", 78, ReleaseChannel::ReleaseLegacy),
        RawVersion::release("1.8.x", 47),
        RawVersion::release("1.9.3-1.9.4", 110),
        RawVersion::new("17w45a", 0x4000_0000 + 1, ReleaseChannel::Special),
        RawVersion::release("1.12.2", 340),
    ]
}

pub fn facade_over(provider: &Rc<FakeProvider>, ui: &Rc<FakeUi>) -> CompatibilityFacade {
    CompatibilityFacade::new(
        Some(provider.clone() as Rc<dyn ExternalVersionProvider>),
        ui.clone() as Rc<dyn HostUiSystem>,
    )
}
