//! The fixed accessibility contract of the call screen.
//!
//! Labels are the Spanish strings the page ships with and are compared
//! exactly, case included.

/// Overlay shown until the user presses the start control.
pub const ONBOARDING_SELECTOR: &str = "#onboarding";
/// Control that dismisses the onboarding overlay.
pub const START_SELECTOR: &str = ".btn-start";

pub const ONBOARDING_SCREENSHOT: &str = "onboarding_a11y.png";
pub const MAIN_UI_SCREENSHOT: &str = "main_ui_a11y.png";
pub const ERROR_SCREENSHOT: &str = "error.png";

/// One attribute and the literal it must equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    pub attribute: &'static str,
    pub expected: &'static str,
}

/// A named element and the attributes it must expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeCheck {
    pub name: &'static str,
    /// Must match exactly one element.
    pub selector: &'static str,
    pub expectations: &'static [Expectation],
    /// Progress line logged when every expectation holds.
    pub success: &'static str,
}

const fn aria_label(expected: &'static str) -> Expectation {
    Expectation {
        attribute: "aria-label",
        expected,
    }
}

/// Checks in evaluation order.
pub const CHECKLIST: &[AttributeCheck] = &[
    AttributeCheck {
        name: "ringtone selector",
        selector: "#ringtone-type",
        expectations: &[aria_label("Seleccionar tono de llamada")],
        success: "Ringtone selector has aria-label",
    },
    AttributeCheck {
        name: "do-not-disturb toggle",
        selector: "#dnd-toggle",
        expectations: &[aria_label("Activar modo No Molestar")],
        success: "DND toggle has aria-label",
    },
    AttributeCheck {
        name: "battery optimization control",
        selector: "#battery-opt-wrapper",
        expectations: &[
            Expectation {
                attribute: "role",
                expected: "button",
            },
            Expectation {
                attribute: "tabindex",
                expected: "0",
            },
            aria_label("Solicitar optimización de batería"),
        ],
        success: "Battery optimization div has role=button and aria-label",
    },
    // `.btn-hangup` exists in both the incoming and the active call controls.
    AttributeCheck {
        name: "call reject button",
        selector: "#controls-incoming .btn-hangup",
        expectations: &[aria_label("Rechazar llamada")],
        success: "Hangup button has aria-label",
    },
    AttributeCheck {
        name: "call answer button",
        selector: ".btn-answer",
        expectations: &[aria_label("Contestar llamada")],
        success: "Answer button has aria-label",
    },
    AttributeCheck {
        name: "mute button",
        selector: "#btn-mute",
        expectations: &[aria_label("Silenciar micrófono")],
        success: "Mute button has aria-label",
    },
];
