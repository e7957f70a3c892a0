//! Order form state machine: focus, per-field validity, submit gate, and
//! the deferred post-success reset.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use vitrine::catalog::{product, ProductKey};
use vitrine::validate;

/// Success acknowledgment stays up this long before the form resets.
pub(crate) const FORM_RESET_DELAY: Duration = Duration::from_secs(3);

/// The five validated fields, in tab order.
pub(crate) const VALIDATED_FIELDS: [Field; 5] = [
    Field::Name,
    Field::Email,
    Field::Phone,
    Field::Product,
    Field::Quantity,
];

/// Every focusable control on the form, in tab order.
pub(crate) const FOCUS_ORDER: [Field; 8] = [
    Field::Name,
    Field::Email,
    Field::Phone,
    Field::Product,
    Field::Quantity,
    Field::Message,
    Field::Contact,
    Field::Submit,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Name,
    Email,
    Phone,
    Product,
    Quantity,
    Message,
    Contact,
    Submit,
}

impl Field {
    /// Whether the field takes typed characters.
    #[must_use]
    pub(crate) fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Name | Self::Email | Self::Phone | Self::Quantity | Self::Message
        )
    }

    /// Error copy shown under the field while invalid.
    #[must_use]
    pub(crate) fn error_message(&self) -> &'static str {
        match self {
            Self::Name => "Please enter at least 2 characters.",
            Self::Email => "Please enter a valid email address.",
            Self::Phone => "Use 7-15 digits, spaces, + or -.",
            Self::Product => "Please choose a piece.",
            Self::Quantity => "Quantity must be between 1 and 10.",
            Self::Message | Self::Contact | Self::Submit => "",
        }
    }
}

/// Derived validity for one field. `Unchecked` fields show no marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Validity {
    #[default]
    Unchecked,
    Valid,
    Invalid,
}

/// Preferred way to be contacted about the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ContactMethod {
    #[default]
    Email,
    Phone,
}

impl ContactMethod {
    #[must_use]
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    #[must_use]
    pub(crate) fn toggled(&self) -> Self {
        match self {
            Self::Email => Self::Phone,
            Self::Phone => Self::Email,
        }
    }
}

/// Snapshot captured at the moment a submission passes the gate.
/// Logged as the handoff boundary; nothing downstream consumes it here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct OrderSubmission {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) product: &'static str,
    pub(crate) quantity: String,
    pub(crate) message: String,
    pub(crate) contact_method: &'static str,
}

/// The whole order form.
#[derive(Debug, Clone, Default)]
pub(crate) struct OrderForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) quantity: String,
    pub(crate) message: String,
    pub(crate) product: Option<ProductKey>,
    pub(crate) contact: ContactMethod,
    pub(crate) focus: Option<Field>,
    validity: [Validity; 5],
    success_visible: bool,
    reset_deadline: Option<Instant>,
}

impl OrderForm {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn validity_slot(field: Field) -> Option<usize> {
        VALIDATED_FIELDS.iter().position(|f| *f == field)
    }

    /// Current marker for a field.
    #[must_use]
    pub(crate) fn validity(&self, field: Field) -> Validity {
        Self::validity_slot(field)
            .map(|slot| self.validity[slot])
            .unwrap_or(Validity::Unchecked)
    }

    /// Whether a field's error message is visible.
    #[must_use]
    pub(crate) fn error_visible(&self, field: Field) -> bool {
        self.validity(field) == Validity::Invalid
    }

    #[must_use]
    pub(crate) fn success_visible(&self) -> bool {
        self.success_visible
    }

    /// The submit control is disabled while a reset is pending.
    #[must_use]
    pub(crate) fn submit_enabled(&self) -> bool {
        self.reset_deadline.is_none()
    }

    /// Move focus to the next control in tab order (wrapping), or onto the
    /// first control when nothing is focused.
    pub(crate) fn focus_next(&mut self) {
        self.focus = Some(match self.focus {
            None => FOCUS_ORDER[0],
            Some(current) => {
                let at = FOCUS_ORDER.iter().position(|f| *f == current).unwrap_or(0);
                FOCUS_ORDER[(at + 1) % FOCUS_ORDER.len()]
            }
        });
    }

    /// Move focus to the previous control in tab order (wrapping).
    pub(crate) fn focus_prev(&mut self) {
        self.focus = Some(match self.focus {
            None => FOCUS_ORDER[FOCUS_ORDER.len() - 1],
            Some(current) => {
                let at = FOCUS_ORDER.iter().position(|f| *f == current).unwrap_or(0);
                FOCUS_ORDER[(at + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len()]
            }
        });
    }

    fn text_field_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Phone => Some(&mut self.phone),
            Field::Quantity => Some(&mut self.quantity),
            Field::Message => Some(&mut self.message),
            _ => None,
        }
    }

    /// Current raw value of a text field.
    #[must_use]
    pub(crate) fn text_value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Quantity => &self.quantity,
            Field::Message => &self.message,
            _ => "",
        }
    }

    /// Type a character into the focused text field, revalidating it.
    pub(crate) fn insert_char(&mut self, ch: char) {
        let Some(field) = self.focus else { return };
        if ch.is_control() {
            return;
        }
        if let Some(value) = self.text_field_mut(field) {
            value.push(ch);
            self.revalidate(field);
        }
    }

    /// Delete the last character of the focused text field, revalidating it.
    pub(crate) fn backspace(&mut self) {
        let Some(field) = self.focus else { return };
        if let Some(value) = self.text_field_mut(field) {
            value.pop();
            self.revalidate(field);
        }
    }

    /// Cycle the product selection forward or backward through
    /// none -> ring -> necklace -> earrings, revalidating the field.
    pub(crate) fn cycle_product(&mut self, forward: bool) {
        let order = [
            None,
            Some(ProductKey::Ring),
            Some(ProductKey::Necklace),
            Some(ProductKey::Earrings),
        ];
        let at = order.iter().position(|p| *p == self.product).unwrap_or(0);
        let next = if forward {
            (at + 1) % order.len()
        } else {
            (at + order.len() - 1) % order.len()
        };
        self.product = order[next];
        self.revalidate(Field::Product);
    }

    /// Flip the contact-method radio.
    pub(crate) fn toggle_contact(&mut self) {
        self.contact = self.contact.toggled();
    }

    fn check(&self, field: Field) -> bool {
        match field {
            Field::Name => validate::validate_name(&self.name),
            Field::Email => validate::validate_email(&self.email),
            Field::Phone => validate::validate_phone(&self.phone),
            Field::Product => validate::validate_product(self.product),
            Field::Quantity => validate::validate_quantity(&self.quantity),
            Field::Message | Field::Contact | Field::Submit => true,
        }
    }

    /// Re-run one field's predicate and refresh its marker.
    /// This is the real-time hook, called on every edit to that field.
    pub(crate) fn revalidate(&mut self, field: Field) {
        if let Some(slot) = Self::validity_slot(field) {
            self.validity[slot] = if self.check(field) {
                Validity::Valid
            } else {
                Validity::Invalid
            };
        }
    }

    /// Re-run all five predicates, refreshing every marker, and report
    /// whether the gate passes. Runs regardless of prior state.
    pub(crate) fn validate_all(&mut self) -> bool {
        let mut all_valid = true;
        for field in VALIDATED_FIELDS {
            self.revalidate(field);
            all_valid &= self.validity(field) == Validity::Valid;
        }
        all_valid
    }

    /// Attempt submission. On a passing gate: show the acknowledgment,
    /// arm the reset deadline, and return the captured snapshot. A failing
    /// gate changes nothing beyond the per-field markers. Re-entrant
    /// submission while a reset is pending is ignored.
    pub(crate) fn submit(&mut self, now: Instant) -> Option<OrderSubmission> {
        if !self.submit_enabled() {
            return None;
        }
        if !self.validate_all() {
            return None;
        }

        let submission = OrderSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            product: self.product.map(|key| product(key).name).unwrap_or(""),
            quantity: self.quantity.clone(),
            message: self.message.clone(),
            contact_method: self.contact.label(),
        };
        info!(
            order = %serde_json::to_string(&submission).unwrap_or_default(),
            "order submitted"
        );

        self.success_visible = true;
        self.reset_deadline = Some(now + FORM_RESET_DELAY);
        Some(submission)
    }

    /// Fire the pending reset when its deadline passes: clear every field,
    /// hide the acknowledgment, and strip all validity markers.
    /// Returns `true` when the reset fired.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        match self.reset_deadline {
            Some(deadline) if now >= deadline => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.quantity.clear();
        self.message.clear();
        self.product = None;
        self.contact = ContactMethod::default();
        self.validity = [Validity::Unchecked; 5];
        self.success_visible = false;
        self.reset_deadline = None;
    }
}
