//! InteractivityEngine: one position source + resolver bound to a shared player.
//!
//! Methods:
//! - new (validate → subscribe), reconfigure (teardown → validate → subscribe), teardown
//! - handle: resolve one position and apply it, used by the subscription and by tests

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, error};

use crate::commands::CommandOutcome;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::ids::ListenerId;
use crate::player::SharedPlayer;
use crate::position::{Position, PositionSource};
use crate::resolver::{ActionResolver, ResolvedCommand};

/// State reachable from the source subscription.
#[derive(Debug)]
struct EngineCore {
    resolver: ActionResolver,
    player: SharedPlayer,
    /// Last applied command and the player revision right after applying it.
    last_applied: Option<(ResolvedCommand, u64)>,
    active: bool,
}

impl EngineCore {
    fn handle(&mut self, position: &Position) -> bool {
        if !self.active {
            return false;
        }
        let resolved = self.resolver.resolve(position);
        if resolved.is_hold() {
            return false;
        }
        let continuous = self.resolver.mode().is_spatial();
        let mut player = self.player.borrow_mut();
        if continuous {
            if let Some((last, rev)) = &self.last_applied {
                if *last == resolved && *rev == player.revision() {
                    debug!("engine: {resolved:?} already applied, suppressed");
                    return false;
                }
            }
        }
        let mut rejected = false;
        for cmd in resolved.to_commands() {
            rejected |= player.apply(cmd) == CommandOutcome::Rejected;
        }
        // A rejected resolution is retried on the next position.
        self.last_applied = if rejected {
            None
        } else {
            Some((resolved, player.revision()))
        };
        true
    }
}

/// Drives a [`SharedPlayer`] from a [`PositionSource`].
///
/// Dropping the engine tears it down. The player is left in whatever state
/// the last command put it in.
pub struct InteractivityEngine {
    core: Rc<RefCell<EngineCore>>,
    source: Rc<RefCell<dyn PositionSource>>,
    subscription: Option<ListenerId>,
    config: EngineConfig,
}

impl fmt::Debug for InteractivityEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractivityEngine")
            .field("mode", &self.config.mode)
            .field("subscription", &self.subscription)
            .finish()
    }
}

fn check(
    config: &EngineConfig,
    source: &Rc<RefCell<dyn PositionSource>>,
) -> Result<ActionResolver, ConfigError> {
    let source_mode = source.borrow().mode();
    if source_mode != config.mode {
        return Err(ConfigError::ModeMismatch {
            config_mode: config.mode,
            source_mode,
        });
    }
    ActionResolver::from_config(config)
}

fn subscribe(
    source: &Rc<RefCell<dyn PositionSource>>,
    core: &Rc<RefCell<EngineCore>>,
) -> ListenerId {
    let weak: Weak<RefCell<EngineCore>> = Rc::downgrade(core);
    source.borrow_mut().subscribe(Box::new(move |position: &Position| {
        if let Some(core) = weak.upgrade() {
            core.borrow_mut().handle(position);
        }
    }))
}

impl InteractivityEngine {
    /// Validate `config` and subscribe to `source`. On error nothing is
    /// subscribed and the player is untouched.
    pub fn new(
        config: EngineConfig,
        source: Rc<RefCell<dyn PositionSource>>,
        player: SharedPlayer,
    ) -> Result<Self, ConfigError> {
        let resolver = check(&config, &source).map_err(|e| {
            error!("engine: invalid interactivity config: {e}");
            e
        })?;
        let core = Rc::new(RefCell::new(EngineCore {
            resolver,
            player,
            last_applied: None,
            active: true,
        }));
        let subscription = Some(subscribe(&source, &core));
        debug!("engine: subscribed in {:?} mode", config.mode);
        Ok(Self {
            core,
            source,
            subscription,
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn player(&self) -> SharedPlayer {
        self.core.borrow().player.clone()
    }

    /// Resolve and apply one position directly, bypassing the source.
    /// Returns whether any player command was issued.
    pub fn handle(&self, position: &Position) -> bool {
        self.core.borrow_mut().handle(position)
    }

    /// Last command the engine applied, if any.
    pub fn last_applied(&self) -> Option<ResolvedCommand> {
        self.core.borrow().last_applied.as_ref().map(|(c, _)| c.clone())
    }

    /// Remove the subscription synchronously. Idempotent.
    pub fn teardown(&mut self) {
        self.core.borrow_mut().active = false;
        if let Some(id) = self.subscription.take() {
            self.source.borrow_mut().unsubscribe(id);
            debug!("engine: unsubscribed from {:?} source", self.config.mode);
        }
    }

    /// Replace config and source. The old subscription is always removed
    /// first; on error the engine stays torn down.
    pub fn reconfigure(
        &mut self,
        config: EngineConfig,
        source: Rc<RefCell<dyn PositionSource>>,
    ) -> Result<(), ConfigError> {
        self.teardown();
        let resolver = check(&config, &source).map_err(|e| {
            error!("engine: invalid interactivity config: {e}");
            e
        })?;
        {
            let mut core = self.core.borrow_mut();
            core.resolver = resolver;
            core.last_applied = None;
            core.active = true;
        }
        self.subscription = Some(subscribe(&source, &self.core));
        self.source = source;
        self.config = config;
        Ok(())
    }
}

impl Drop for InteractivityEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}
