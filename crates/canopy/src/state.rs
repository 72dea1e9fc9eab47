//! Caller-side view state.
//!
//! The layout engines never hold state. Whatever drives them (a CLI, an
//! interactive viewer) keeps a [`ViewState`] and moves it through
//! [`ViewAction`]s, each a pure `state -> state` transform. Pan and zoom are
//! clamped here, so the [`PanWindow`] handed to the viewport is always valid.
//!
//! ```
//! # use canopy::state::{ViewAction, ViewState};
//! let state = ViewState::default()
//!     .apply(ViewAction::ZoomIn)
//!     .apply(ViewAction::PanRight);
//!
//! assert_eq!((state.pan().min(), state.pan().max()), (20.0, 100.0));
//! assert!(!state.can_pan_right());
//! ```

use std::{fmt, str::FromStr};

use log::warn;
use serde::Serialize;

use crate::layout::{interval::PanWindow, tree::TreeOptions};

/// Percent points moved by one pan or zoom step.
pub const PAN_STEP: f64 = 10.0;

/// Narrowest window zoom-in will produce, in percent points.
pub const MIN_WINDOW: f64 = 1.0;

/// Every transition a [`ViewState`] supports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewAction {
    ToggleCladogram,
    ToggleSupportValues,
    ToggleShadeBySupport,
    SetFontSize(f32),
    SetWidth(f32),
    SetHeight(f32),
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    Reset,
}

impl FromStr for ViewAction {
    type Err = String;

    /// Parses `pan-left`, `zoom-in`, `font-size=14` and friends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (s.trim(), None),
        };

        let number = |value: Option<&str>| -> Result<f32, String> {
            let value = value.ok_or_else(|| format!("action `{name}` needs a value, e.g. `{name}=12`"))?;
            value
                .parse::<f32>()
                .map_err(|err| format!("invalid value `{value}` for `{name}`: {err}"))
        };

        match name {
            "toggle-cladogram" => Ok(Self::ToggleCladogram),
            "toggle-support-values" => Ok(Self::ToggleSupportValues),
            "toggle-shade-by-support" => Ok(Self::ToggleShadeBySupport),
            "font-size" => number(value).map(Self::SetFontSize),
            "width" => number(value).map(Self::SetWidth),
            "height" => number(value).map(Self::SetHeight),
            "pan-left" => Ok(Self::PanLeft),
            "pan-right" => Ok(Self::PanRight),
            "zoom-in" => Ok(Self::ZoomIn),
            "zoom-out" => Ok(Self::ZoomOut),
            "reset" => Ok(Self::Reset),
            _ => Err(format!(
                "unknown view action `{s}`, valid values: toggle-cladogram, toggle-support-values, \
                 toggle-shade-by-support, font-size=N, width=N, height=N, pan-left, pan-right, \
                 zoom-in, zoom-out, reset"
            )),
        }
    }
}

impl fmt::Display for ViewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToggleCladogram => write!(f, "toggle-cladogram"),
            Self::ToggleSupportValues => write!(f, "toggle-support-values"),
            Self::ToggleShadeBySupport => write!(f, "toggle-shade-by-support"),
            Self::SetFontSize(size) => write!(f, "font-size={size}"),
            Self::SetWidth(width) => write!(f, "width={width}"),
            Self::SetHeight(height) => write!(f, "height={height}"),
            Self::PanLeft => write!(f, "pan-left"),
            Self::PanRight => write!(f, "pan-right"),
            Self::ZoomIn => write!(f, "zoom-in"),
            Self::ZoomOut => write!(f, "zoom-out"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

/// Display toggles, canvas size and the gene model pan window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    cladogram: bool,
    show_support_values: bool,
    shade_branch_by_support: bool,
    font_size: f32,
    width: f32,
    height: f32,
    pan: PanWindow,
}

impl Default for ViewState {
    /// Phylogram with supports shown and shaded, 940 x 740, full window.
    fn default() -> Self {
        Self {
            cladogram: false,
            show_support_values: true,
            shade_branch_by_support: true,
            font_size: 11.0,
            width: 940.0,
            height: 740.0,
            pan: PanWindow::FULL,
        }
    }
}

impl ViewState {
    /// Starts from configured tree options with the full pan window.
    pub fn from_tree_options(options: &TreeOptions) -> Self {
        Self {
            cladogram: options.cladogram(),
            show_support_values: options.show_support_values(),
            shade_branch_by_support: options.shade_branch_by_support(),
            font_size: options.font_size(),
            width: options.width(),
            height: options.height(),
            pan: PanWindow::FULL,
        }
    }

    /// Replaces the gene model pan window.
    pub fn with_pan_window(self, pan: PanWindow) -> Self {
        Self { pan, ..self }
    }

    pub fn cladogram(&self) -> bool {
        self.cladogram
    }

    pub fn show_support_values(&self) -> bool {
        self.show_support_values
    }

    pub fn shade_branch_by_support(&self) -> bool {
        self.shade_branch_by_support
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn pan(&self) -> PanWindow {
        self.pan
    }

    /// Returns the state after `action`.
    ///
    /// Size actions with a negative or non-finite value leave the state
    /// unchanged.
    pub fn apply(self, action: ViewAction) -> Self {
        let pan = self.pan;
        match action {
            ViewAction::ToggleCladogram => Self {
                cladogram: !self.cladogram,
                ..self
            },
            ViewAction::ToggleSupportValues => Self {
                show_support_values: !self.show_support_values,
                ..self
            },
            ViewAction::ToggleShadeBySupport => Self {
                shade_branch_by_support: !self.shade_branch_by_support,
                ..self
            },
            ViewAction::SetFontSize(font_size) => match valid_size(action, font_size) {
                Some(font_size) if font_size > 0.0 => Self { font_size, ..self },
                Some(_) => {
                    warn!(action:% = action; "Ignoring zero font size");
                    self
                }
                None => self,
            },
            ViewAction::SetWidth(width) => match valid_size(action, width) {
                Some(width) => Self { width, ..self },
                None => self,
            },
            ViewAction::SetHeight(height) => match valid_size(action, height) {
                Some(height) => Self { height, ..self },
                None => self,
            },
            ViewAction::PanLeft => {
                let shift = PAN_STEP.min(pan.min());
                self.with_pan(pan.min() - shift, pan.max() - shift)
            }
            ViewAction::PanRight => {
                let shift = PAN_STEP.min(100.0 - pan.max());
                self.with_pan(pan.min() + shift, pan.max() + shift)
            }
            ViewAction::ZoomIn => {
                if !self.can_zoom_in() {
                    return self;
                }
                let (min, max) = (pan.min() + PAN_STEP, pan.max() - PAN_STEP);
                if max - min >= MIN_WINDOW {
                    self.with_pan(min, max)
                } else {
                    let centre = (pan.min() + pan.max()) / 2.0;
                    self.with_pan(centre - MIN_WINDOW / 2.0, centre + MIN_WINDOW / 2.0)
                }
            }
            ViewAction::ZoomOut => self.with_pan(
                (pan.min() - PAN_STEP).max(0.0),
                (pan.max() + PAN_STEP).min(100.0),
            ),
            ViewAction::Reset => Self {
                pan: PanWindow::FULL,
                ..self
            },
        }
    }

    /// Applies a sequence of actions in order.
    pub fn apply_all(self, actions: impl IntoIterator<Item = ViewAction>) -> Self {
        actions
            .into_iter()
            .fold(self, |state, action| state.apply(action))
    }

    pub fn can_pan_left(&self) -> bool {
        self.pan.min() > 0.0
    }

    pub fn can_pan_right(&self) -> bool {
        self.pan.max() < 100.0
    }

    pub fn can_zoom_out(&self) -> bool {
        self.can_pan_left() || self.can_pan_right()
    }

    pub fn can_zoom_in(&self) -> bool {
        self.pan.len() > MIN_WINDOW
    }

    pub fn can_reset(&self) -> bool {
        !self.pan.is_full()
    }

    /// Overlays the toggles and canvas size onto configured tree options.
    pub fn tree_options(&self, base: &TreeOptions) -> TreeOptions {
        base.clone()
            .with_cladogram(self.cladogram)
            .with_support_values(self.show_support_values)
            .with_shading(self.shade_branch_by_support)
            .with_font_size(self.font_size)
            .with_size(self.width, self.height)
    }

    fn with_pan(self, min: f64, max: f64) -> Self {
        Self {
            pan: PanWindow::new_unchecked(min, max),
            ..self
        }
    }
}

fn valid_size(action: ViewAction, value: f32) -> Option<f32> {
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        warn!(action:% = action; "Ignoring view action with an invalid size");
        None
    }
}
