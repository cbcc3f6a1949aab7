//! The booking wizard as an explicit finite-state machine.
//!
//! Five steps, strictly linear, with free backward navigation:
//!
//! ```text
//! ServiceAndDate → Barber → Time → Details → Success
//! ```
//!
//! Each forward transition is guarded (date not in the past, barber not on
//! a day off, slot not reserved, contact fields complete); backward
//! transitions discard nothing. The machine is pure -- it never talks to
//! the network. [`ShopSession::submit_booking`](crate::ShopSession) performs
//! the POST and calls [`Wizard::complete`] only on a 2xx response, so a
//! failed submission leaves the user on `Details` for another attempt.

use chrono::NaiveDate;
use thiserror::Error;

use trimly_api::{CustomerAccount, NewBooking};

use crate::model::{DayOff, Service, is_on_grid};

/// The wizard's five steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ServiceAndDate,
    Barber,
    Time,
    Details,
    Success,
}

impl Step {
    /// Transition table: the step reached by navigating back, if any.
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::ServiceAndDate | Self::Success => None,
            Self::Barber => Some(Self::ServiceAndDate),
            Self::Time => Some(Self::Barber),
            Self::Details => Some(Self::Time),
        }
    }

    /// Transition table: the step reached by a successful forward guard.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::ServiceAndDate => Some(Self::Barber),
            Self::Barber => Some(Self::Time),
            Self::Time => Some(Self::Details),
            Self::Details => Some(Self::Success),
            Self::Success => None,
        }
    }
}

/// Barber selection: an explicit "no preference" or a concrete directory id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BarberChoice {
    Any,
    Chosen(String),
}

impl BarberChoice {
    /// The id sent on the wire (`None` = any).
    pub fn wire_id(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Chosen(id) => Some(id),
        }
    }
}

/// Customer contact fields. `message` is the only optional one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl Contact {
    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.surname.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.phone.trim().is_empty()
    }

    /// Pre-fill from a logged-in customer account. Overwrites name, surname,
    /// email, and phone; leaves the message untouched.
    pub fn prefill(&mut self, account: &CustomerAccount) {
        self.name = account.name.clone();
        self.surname = account.surname.clone();
        self.email = account.email.clone();
        self.phone = account.phone.clone().unwrap_or_default();
    }
}

/// Everything the user has entered so far. Survives backward navigation
/// in full -- only re-selection overwrites a field.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub date: Option<NaiveDate>,
    pub service: Option<Service>,
    pub barber: Option<BarberChoice>,
    pub time: Option<String>,
    pub contact: Contact,
}

/// Guard failures. Every variant leaves the machine exactly where it was.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("the selected date is in the past")]
    DateInPast,

    #[error("pick a date and a service before continuing")]
    MissingDateOrService,

    #[error("barber '{id}' has a day off on the selected date")]
    BarberUnavailable { id: String },

    #[error("'{slot}' is not a slot on the schedule grid")]
    UnknownSlot { slot: String },

    #[error("slot {slot} is already reserved")]
    SlotReserved { slot: String },

    #[error("name, surname, phone, and email are required")]
    IncompleteContact,

    #[error("not allowed while on the {0:?} step")]
    WrongStep(Step),
}

/// The booking wizard state machine.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: Step,
    draft: Draft,
}

impl Default for Step {
    fn default() -> Self {
        Self::ServiceAndDate
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Mutable access to the contact fields. The user can keep editing
    /// these on the Details step right up to submission.
    pub fn contact_mut(&mut self) -> &mut Contact {
        &mut self.draft.contact
    }

    // ── Step 1: service and date ─────────────────────────────────────

    /// Pick the appointment date. Only today or later is accepted.
    pub fn set_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), WizardError> {
        self.require_step(Step::ServiceAndDate)?;
        if date < today {
            return Err(WizardError::DateInPast);
        }
        self.draft.date = Some(date);
        Ok(())
    }

    /// Pick the service.
    pub fn set_service(&mut self, service: Service) -> Result<(), WizardError> {
        self.require_step(Step::ServiceAndDate)?;
        self.draft.service = Some(service);
        Ok(())
    }

    /// Advance to barber selection; requires both date and service.
    pub fn confirm_service_and_date(&mut self) -> Result<(), WizardError> {
        self.require_step(Step::ServiceAndDate)?;
        if self.draft.date.is_none() || self.draft.service.is_none() {
            return Err(WizardError::MissingDateOrService);
        }
        self.step = Step::Barber;
        Ok(())
    }

    // ── Step 2: barber ───────────────────────────────────────────────

    /// Pick a barber (or "any") and advance to time selection.
    ///
    /// A concrete barber with a day off covering the selected date is
    /// rejected -- the caller should not have offered them, but the guard
    /// holds regardless.
    pub fn choose_barber<'a, I>(&mut self, choice: BarberChoice, day_offs: I) -> Result<(), WizardError>
    where
        I: IntoIterator<Item = &'a DayOff>,
    {
        self.require_step(Step::Barber)?;
        if let (BarberChoice::Chosen(id), Some(date)) = (&choice, self.draft.date) {
            if day_offs.into_iter().any(|d| d.covers(id, date)) {
                return Err(WizardError::BarberUnavailable { id: id.clone() });
            }
        }
        self.draft.barber = Some(choice);
        self.step = Step::Time;
        Ok(())
    }

    // ── Step 3: time ─────────────────────────────────────────────────

    /// Pick a slot and advance to details. The slot must be on the grid
    /// and outside the reserved set for the current `(date, barber)` pair.
    pub fn choose_slot(&mut self, slot: &str, reserved: &[String]) -> Result<(), WizardError> {
        self.require_step(Step::Time)?;
        if !is_on_grid(slot) {
            return Err(WizardError::UnknownSlot {
                slot: slot.to_owned(),
            });
        }
        if reserved.iter().any(|r| r == slot) {
            return Err(WizardError::SlotReserved {
                slot: slot.to_owned(),
            });
        }
        self.draft.time = Some(slot.to_owned());
        self.step = Step::Details;
        Ok(())
    }

    // ── Step 4: details and submission ───────────────────────────────

    /// Whether the draft is ready to submit.
    pub fn can_submit(&self) -> Result<(), WizardError> {
        self.require_step(Step::Details)?;
        if !self.draft.contact.is_complete() {
            return Err(WizardError::IncompleteContact);
        }
        Ok(())
    }

    /// Build the submission payload. Price is looked up from the service
    /// table here, at submission time, and travels with the booking.
    pub fn build_request(&self) -> Result<NewBooking, WizardError> {
        self.can_submit()?;
        // The guards on earlier transitions make these unreachable.
        let date = self.draft.date.ok_or(WizardError::MissingDateOrService)?;
        let service = self.draft.service.ok_or(WizardError::MissingDateOrService)?;
        let time = self
            .draft
            .time
            .clone()
            .ok_or(WizardError::WrongStep(self.step))?;
        let barber = self
            .draft
            .barber
            .as_ref()
            .ok_or(WizardError::WrongStep(self.step))?;

        Ok(NewBooking {
            barber: barber.wire_id().map(str::to_owned),
            service: service.id().to_owned(),
            date,
            time,
            name: self.draft.contact.name.clone(),
            surname: self.draft.contact.surname.clone(),
            email: self.draft.contact.email.clone(),
            phone: self.draft.contact.phone.clone(),
            message: self.draft.contact.message.clone(),
            price: service.price(),
        })
    }

    /// Mark the booking as accepted by the backend. Only the session calls
    /// this, and only after a 2xx response.
    pub fn complete(&mut self) -> Result<(), WizardError> {
        self.require_step(Step::Details)?;
        self.step = Step::Success;
        Ok(())
    }

    // ── Backward navigation ──────────────────────────────────────────

    /// Navigate one step back, keeping every entered field. Returns the
    /// new step, or `None` on the first/terminal step.
    pub fn back(&mut self) -> Option<Step> {
        let previous = self.step.previous()?;
        self.step = previous;
        Some(previous)
    }

    fn require_step(&self, expected: Step) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep(self.step))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("date")
    }

    fn today() -> NaiveDate {
        d("2025-03-01")
    }

    /// Drive a wizard to the Details step with a concrete barber.
    fn at_details() -> Wizard {
        let mut w = Wizard::new();
        w.set_date(d("2025-03-10"), today()).expect("date");
        w.set_service(Service::Cut).expect("service");
        w.confirm_service_and_date().expect("advance");
        w.choose_barber(BarberChoice::Chosen("b1".into()), &[])
            .expect("barber");
        w.choose_slot("10:00", &[]).expect("slot");
        w
    }

    #[test]
    fn happy_path_reaches_success() {
        let mut w = at_details();
        let contact = w.contact_mut();
        contact.name = "Mario".into();
        contact.surname = "Rossi".into();
        contact.email = "mario@example.com".into();
        contact.phone = "3331234567".into();

        let request = w.build_request().expect("request");
        assert_eq!(request.barber.as_deref(), Some("b1"));
        assert_eq!(request.service, "cut");
        assert_eq!(request.price, 30.0);
        assert_eq!(request.time, "10:00");

        w.complete().expect("complete");
        assert_eq!(w.step(), Step::Success);
    }

    #[test]
    fn past_date_is_rejected() {
        let mut w = Wizard::new();
        assert_eq!(
            w.set_date(d("2025-02-28"), today()),
            Err(WizardError::DateInPast)
        );
        // Today itself is fine.
        w.set_date(today(), today()).expect("today");
    }

    #[test]
    fn cannot_advance_without_both_fields() {
        let mut w = Wizard::new();
        w.set_service(Service::Beard).expect("service");
        assert_eq!(
            w.confirm_service_and_date(),
            Err(WizardError::MissingDateOrService)
        );
        w.set_date(d("2025-03-10"), today()).expect("date");
        w.confirm_service_and_date().expect("advance");
        assert_eq!(w.step(), Step::Barber);
    }

    #[test]
    fn day_off_barber_is_rejected() {
        let mut w = Wizard::new();
        w.set_date(d("2025-03-10"), today()).expect("date");
        w.set_service(Service::Cut).expect("service");
        w.confirm_service_and_date().expect("advance");

        let day_offs = vec![DayOff {
            id: 1,
            barber_id: "b1".into(),
            date: d("2025-03-10"),
        }];
        assert_eq!(
            w.choose_barber(BarberChoice::Chosen("b1".into()), &day_offs),
            Err(WizardError::BarberUnavailable { id: "b1".into() })
        );
        // "Any" is never blocked by day-offs.
        w.choose_barber(BarberChoice::Any, &day_offs).expect("any");
        assert_eq!(w.step(), Step::Time);
    }

    #[test]
    fn reserved_slot_is_rejected() {
        let mut w = Wizard::new();
        w.set_date(d("2025-03-10"), today()).expect("date");
        w.set_service(Service::Cut).expect("service");
        w.confirm_service_and_date().expect("advance");
        w.choose_barber(BarberChoice::Chosen("b1".into()), &[])
            .expect("barber");

        let reserved = vec!["10:00".to_owned(), "10:30".to_owned()];
        assert_eq!(
            w.choose_slot("10:00", &reserved),
            Err(WizardError::SlotReserved {
                slot: "10:00".into()
            })
        );
        assert_eq!(
            w.choose_slot("08:00", &reserved),
            Err(WizardError::UnknownSlot {
                slot: "08:00".into()
            })
        );
        w.choose_slot("11:00", &reserved).expect("free slot");
        assert_eq!(w.step(), Step::Details);
    }

    #[test]
    fn incomplete_contact_blocks_submission() {
        let mut w = at_details();
        assert_eq!(w.can_submit(), Err(WizardError::IncompleteContact));

        let contact = w.contact_mut();
        contact.name = "Mario".into();
        contact.surname = "Rossi".into();
        contact.email = "mario@example.com".into();
        assert_eq!(w.can_submit(), Err(WizardError::IncompleteContact));

        w.contact_mut().phone = "3331234567".into();
        w.can_submit().expect("complete contact");
        // Message stays optional.
        assert!(w.draft().contact.message.is_empty());
    }

    #[test]
    fn back_navigation_discards_nothing() {
        let mut w = at_details();

        assert_eq!(w.back(), Some(Step::Time));
        assert_eq!(w.back(), Some(Step::Barber));
        assert_eq!(w.back(), Some(Step::ServiceAndDate));
        assert_eq!(w.back(), None);

        // Everything entered is still there.
        assert_eq!(w.draft().date, Some(d("2025-03-10")));
        assert_eq!(w.draft().service, Some(Service::Cut));
        assert_eq!(w.draft().barber, Some(BarberChoice::Chosen("b1".into())));
        assert_eq!(w.draft().time.as_deref(), Some("10:00"));

        // And the forward path can be replayed with different choices.
        w.confirm_service_and_date().expect("advance");
        w.choose_barber(BarberChoice::Any, &[]).expect("reassign");
        assert_eq!(w.draft().barber, Some(BarberChoice::Any));
    }

    #[test]
    fn failed_submission_leaves_details_step() {
        let mut w = at_details();
        let contact = w.contact_mut();
        contact.name = "Mario".into();
        contact.surname = "Rossi".into();
        contact.email = "mario@example.com".into();
        contact.phone = "3331234567".into();

        // The session only calls complete() on 2xx; until then the machine
        // stays on Details and the request can be rebuilt for a retry.
        let first = w.build_request().expect("request");
        assert_eq!(w.step(), Step::Details);
        let second = w.build_request().expect("request again");
        assert_eq!(first.time, second.time);
    }

    #[test]
    fn guards_reject_out_of_step_input() {
        let mut w = Wizard::new();
        assert!(matches!(
            w.choose_slot("10:00", &[]),
            Err(WizardError::WrongStep(Step::ServiceAndDate))
        ));
        assert!(matches!(
            w.choose_barber(BarberChoice::Any, &[]),
            Err(WizardError::WrongStep(Step::ServiceAndDate))
        ));
        assert!(matches!(w.complete(), Err(WizardError::WrongStep(_))));
    }
}
