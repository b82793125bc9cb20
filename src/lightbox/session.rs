// SPDX-License-Identifier: MPL-2.0
//! An open lightbox bound to the shell's input sources.
//!
//! Opening a session subscribes to keyboard and touch input; the
//! subscriptions live in the session, so dropping it (on close) detaches
//! every handler it attached.

use super::{Effect, Key, Lightbox, Message};
use crate::config::LightboxConfig;
use crate::domain::gallery::LightboxImage;
use crate::gesture::{ListenerRegistry, Subscription, TouchEvent};
use tokio::sync::mpsc;

/// Document-level input the shell forwards to the engine.
#[derive(Debug, Clone, Default)]
pub struct InputSources {
    pub keys: ListenerRegistry<Key>,
    pub touches: ListenerRegistry<TouchEvent>,
}

impl InputSources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug)]
pub struct LightboxSession {
    lightbox: Lightbox,
    inbox: mpsc::UnboundedReceiver<Message>,
    _subscriptions: [Subscription; 2],
}

impl LightboxSession {
    /// Opens the lightbox and starts listening. `None` for an empty list.
    #[must_use]
    pub fn open(
        sources: &InputSources,
        images: Vec<LightboxImage>,
        start_index: usize,
        config: &LightboxConfig,
        share_supported: bool,
    ) -> Option<Self> {
        let lightbox = Lightbox::open(images, start_index, config, share_supported)?;
        let (sender, inbox) = mpsc::unbounded_channel();

        let key_sender = sender.clone();
        let keys = sources.keys.subscribe(move |key: &Key| {
            let _ = key_sender.send(Message::Key(key.clone()));
        });
        let touches = sources.touches.subscribe(move |event: &TouchEvent| {
            let _ = sender.send(Message::Touch(event.clone()));
        });

        log::debug!(
            "[Lightbox] opened at {} of {}",
            lightbox.current_index() + 1,
            lightbox.images().len()
        );
        Some(Self {
            lightbox,
            inbox,
            _subscriptions: [keys, touches],
        })
    }

    #[must_use]
    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Handles a message from the lightbox's own controls.
    pub fn handle(&mut self, msg: Message) -> Effect {
        self.lightbox.handle(msg)
    }

    /// Applies queued keyboard and touch input in arrival order and returns
    /// the effects that need the shell.
    pub fn pump(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Ok(msg) = self.inbox.try_recv() {
            let effect = self.lightbox.handle(msg);
            if effect == Effect::Close {
                effects.push(effect);
                break;
            }
            if effect != Effect::None {
                effects.push(effect);
            }
        }
        effects
    }
}
