// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caption fade in/out.
//!
//! Hiding is immediate for interaction purposes (the faded style applies at
//! once) and completes after a delay, when the caption is concealed from the
//! render tree. Showing restores paint at once and drops the faded style
//! after a shorter delay. Every transition replaces the pending timer, so the
//! last request always wins.

use understory_timing::Debounce;

use crate::config::CaptionConfig;
use crate::log::trace;
use crate::surface::CaptionStyle;

/// Deferred half of a fade transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeAction {
    /// Remove the faded caption from the render tree.
    Conceal,
    /// Drop the faded style from a re-shown caption.
    Unfade,
}

/// Visible/hidden state machine for the live caption.
#[derive(Clone, Debug)]
pub struct FadeController {
    hidden: bool,
    timer: Debounce<FadeAction>,
    fade_out_delay_ms: u64,
    fade_in_delay_ms: u64,
}

impl FadeController {
    /// Creates a controller in the visible state.
    #[must_use]
    pub fn new(fade_out_delay_ms: u64, fade_in_delay_ms: u64) -> Self {
        Self {
            hidden: false,
            timer: Debounce::new(),
            fade_out_delay_ms,
            fade_in_delay_ms,
        }
    }

    /// Creates a controller using the delays from `config`.
    #[must_use]
    pub fn from_config(config: &CaptionConfig) -> Self {
        Self::new(config.fade_out_delay_ms(), config.fade_in_delay_ms())
    }

    /// Returns `true` while the caption is (being) hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Timestamp at which [`FadeController::tick`] has work to do.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    /// Starts fading the caption out. Returns `false` if it was already hidden.
    pub fn hide(&mut self, caption: &mut CaptionStyle, now: u64) -> bool {
        if self.hidden {
            return false;
        }
        self.hidden = true;
        caption.faded = true;
        self.timer
            .schedule(now, self.fade_out_delay_ms, FadeAction::Conceal);
        trace!(now, "caption fade out");
        true
    }

    /// Starts fading the caption in. Returns `false` if it was already visible.
    pub fn show(&mut self, caption: &mut CaptionStyle, now: u64) -> bool {
        if !self.hidden {
            return false;
        }
        self.hidden = false;
        caption.concealed = false;
        self.timer.schedule(now, self.fade_in_delay_ms, FadeAction::Unfade);
        trace!(now, "caption fade in");
        true
    }

    /// Applies the pending transition if it is due.
    pub fn tick(&mut self, caption: &mut CaptionStyle, now: u64) -> Option<FadeAction> {
        let action = self.timer.poll(now)?;
        match action {
            FadeAction::Conceal => caption.concealed = true,
            FadeAction::Unfade => caption.faded = false,
        }
        Some(action)
    }

    /// Drops any pending transition without applying it.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }
}
