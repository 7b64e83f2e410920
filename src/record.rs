// 🪪 Driver Record - Registration and regulated updates
//
// A record is either unregistered or holds a complete, fully validated
// snapshot. Snapshots are immutable values: every commit swaps in a new one,
// so the birth date literal and its parsed value never disagree.
//
// Updates are NOT transactional. Each gate commits on its own:
//   1. birth date must parse
//   2. a birth date change must be the only change (commit + return)
//   3. address change: age gate, then address rules (commit)
//   4. identifier change: parity gate on the OLD id, then id rules (commit)
//   5. first/last name (commit)
// An address committed at step 3 stays committed when step 4 rejects.

use crate::calendar;
use crate::config::RegistryConfig;
use crate::details::{DetailsFile, DetailsSink};
use crate::ledger::{AccrualOutcome, InfractionEntry, InfractionLedger, SuspensionPolicy};
use crate::rejection::Rejection;
use crate::validators;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// BIRTH DATE
// ============================================================================

/// Birth date as entered ("dd-MM-yyyy") together with its parsed value.
/// Only constructible by parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BirthDate {
    literal: String,
    parsed: NaiveDate,
}

impl BirthDate {
    pub fn parse(text: &str) -> Result<Self, Rejection> {
        let parsed = validators::check_date(text)?;
        Ok(BirthDate {
            literal: text.to_string(),
            parsed,
        })
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn date(&self) -> NaiveDate {
        self.parsed
    }

    /// Age in whole years on `day`
    pub fn age_on(&self, day: NaiveDate) -> i32 {
        calendar::whole_years_between(self.parsed, day)
    }
}

impl TryFrom<String> for BirthDate {
    type Error = Rejection;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        BirthDate::parse(&text)
    }
}

impl From<BirthDate> for String {
    fn from(birth_date: BirthDate) -> Self {
        birth_date.literal
    }
}

// ============================================================================
// DRIVER DETAILS (snapshot value)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverDetails {
    identifier: String,
    first_name: String,
    last_name: String,
    address: String,
    birth_date: BirthDate,
}

impl DriverDetails {
    pub fn new(
        identifier: String,
        first_name: String,
        last_name: String,
        address: String,
        birth_date: BirthDate,
    ) -> Self {
        DriverDetails {
            identifier,
            first_name,
            last_name,
            address,
            birth_date,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn birth_date(&self) -> &BirthDate {
        &self.birth_date
    }

    pub fn with_identifier(&self, identifier: String) -> Self {
        DriverDetails { identifier, ..self.clone() }
    }

    pub fn with_first_name(&self, first_name: String) -> Self {
        DriverDetails { first_name, ..self.clone() }
    }

    pub fn with_last_name(&self, last_name: String) -> Self {
        DriverDetails { last_name, ..self.clone() }
    }

    pub fn with_address(&self, address: String) -> Self {
        DriverDetails { address, ..self.clone() }
    }

    pub fn with_birth_date(&self, birth_date: BirthDate) -> Self {
        DriverDetails { birth_date, ..self.clone() }
    }
}

// ============================================================================
// DRIVER RECORD
// ============================================================================

pub struct DriverRecord<S: DetailsSink = DetailsFile> {
    details: Option<DriverDetails>,
    ledger: InfractionLedger,
    policy: SuspensionPolicy,
    address_change_min_age: i32,
    sink: S,
}

impl<S: DetailsSink> DriverRecord<S> {
    /// Unregistered record using the default regulated constants
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, &RegistryConfig::default())
    }

    pub fn with_config(sink: S, config: &RegistryConfig) -> Self {
        DriverRecord {
            details: None,
            ledger: InfractionLedger::new(),
            policy: config.suspension.clone(),
            address_change_min_age: config.address_change_min_age,
            sink,
        }
    }

    // ========================================================================
    // REGISTER
    // ========================================================================

    /// Validate identifier, address and birth date (in that order) and
    /// commit the whole snapshot. Registering again replaces the snapshot;
    /// the infraction ledger is kept.
    pub fn try_register(
        &mut self,
        identifier: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
        birth_date: &str,
    ) -> Result<(), Rejection> {
        let admitted = validators::check_identifier(identifier)
            .and_then(|_| validators::check_address(address))
            .and_then(|_| BirthDate::parse(birth_date))
            .map_err(|r| rejected("register", r))?;

        self.commit(DriverDetails::new(
            identifier.to_string(),
            first_name.to_string(),
            last_name.to_string(),
            address.to_string(),
            admitted,
        ));
        self.persist();

        tracing::debug!(identifier, "driver registered");
        Ok(())
    }

    pub fn register(
        &mut self,
        identifier: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
        birth_date: &str,
    ) -> bool {
        self.try_register(identifier, first_name, last_name, address, birth_date)
            .is_ok()
    }

    // ========================================================================
    // UPDATE
    // ========================================================================

    /// Staged update; the age gate uses today's local date
    pub fn update(
        &mut self,
        identifier: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
        birth_date: &str,
    ) -> bool {
        self.update_on(today(), identifier, first_name, last_name, address, birth_date)
    }

    /// Staged update with an explicit "today" for the age gate
    pub fn update_on(
        &mut self,
        today: NaiveDate,
        identifier: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
        birth_date: &str,
    ) -> bool {
        self.try_update_on(today, identifier, first_name, last_name, address, birth_date)
            .is_ok()
    }

    pub fn try_update(
        &mut self,
        identifier: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
        birth_date: &str,
    ) -> Result<(), Rejection> {
        self.try_update_on(today(), identifier, first_name, last_name, address, birth_date)
    }

    pub fn try_update_on(
        &mut self,
        today: NaiveDate,
        identifier: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
        birth_date: &str,
    ) -> Result<(), Rejection> {
        self.apply_update(today, identifier, first_name, last_name, address, birth_date)
            .map_err(|r| rejected("update", r))
    }

    fn apply_update(
        &mut self,
        today: NaiveDate,
        identifier: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
        birth_date: &str,
    ) -> Result<(), Rejection> {
        let current = self.current()?.clone();

        // Gate 1: proposed birth date must parse
        let proposed_birth = BirthDate::parse(birth_date)?;

        // Gate 2: birth date changes alone or not at all
        if proposed_birth.date() != current.birth_date().date() {
            let others_unchanged = identifier == current.identifier()
                && first_name == current.first_name()
                && last_name == current.last_name()
                && address == current.address();
            if !others_unchanged {
                return Err(Rejection::BirthDateWithOtherChanges);
            }

            self.commit(current.with_birth_date(proposed_birth));
            self.persist();
            tracing::debug!(identifier, "birth date updated");
            return Ok(());
        }

        // Gate 3: address change needs an adult and a valid address
        if address != current.address() {
            let age = current.birth_date().age_on(today);
            if age < self.address_change_min_age {
                return Err(Rejection::UnderageAddressChange {
                    age,
                    required: self.address_change_min_age,
                });
            }
            validators::check_address(address)?;

            let next = self.current()?.with_address(address.to_string());
            self.commit(next);
            tracing::debug!(identifier = current.identifier(), "address committed");
        }

        // Gate 4: the OLD identifier grants permission to change it
        if identifier != current.identifier() {
            if !validators::starts_with_odd_digit(current.identifier()) {
                let first = current.identifier().chars().next().unwrap_or_default();
                return Err(Rejection::IdentifierChangeNotPermitted(first));
            }
            validators::check_identifier(identifier)?;
            if !validators::starts_with_odd_digit(identifier) {
                let first = identifier.chars().next().unwrap_or_default();
                return Err(Rejection::NewIdentifierNotOdd(first));
            }

            let next = self.current()?.with_identifier(identifier.to_string());
            self.commit(next);
        }

        // Step 5: names always follow once nothing above rejected
        let next = self
            .current()?
            .with_first_name(first_name.to_string())
            .with_last_name(last_name.to_string());
        self.commit(next);
        self.persist();

        tracing::debug!(identifier, "driver details updated");
        Ok(())
    }

    // ========================================================================
    // ACCRUE
    // ========================================================================

    /// Record an offense and re-derive suspension. Returns the new flag.
    /// Never touches the details sink.
    pub fn try_accrue(&mut self, offense_date: &str, points: i32) -> Result<bool, Rejection> {
        let birth_date = self
            .current()
            .map_err(|r| rejected("accrue", r))?
            .birth_date()
            .date();
        let entry =
            InfractionEntry::parse(offense_date, points).map_err(|r| rejected("accrue", r))?;

        Ok(self.ledger.accrue(entry, birth_date, &self.policy))
    }

    pub fn accrue(&mut self, offense_date: &str, points: i32) -> AccrualOutcome {
        AccrualOutcome::from(self.try_accrue(offense_date, points))
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn details(&self) -> Option<&DriverDetails> {
        self.details.as_ref()
    }

    pub fn is_registered(&self) -> bool {
        self.details.is_some()
    }

    pub fn is_suspended(&self) -> bool {
        self.ledger.is_suspended()
    }

    pub fn ledger(&self) -> &InfractionLedger {
        &self.ledger
    }

    pub fn policy(&self) -> &SuspensionPolicy {
        &self.policy
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn current(&self) -> Result<&DriverDetails, Rejection> {
        self.details.as_ref().ok_or(Rejection::NotRegistered)
    }

    fn commit(&mut self, next: DriverDetails) {
        self.details = Some(next);
    }

    /// A failed write is logged; the committed snapshot stands
    fn persist(&mut self) {
        if let Some(details) = &self.details {
            if let Err(err) = self.sink.write_details(details) {
                tracing::warn!(error = %format!("{err:#}"), "failed to persist driver details");
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn rejected(operation: &'static str, rejection: Rejection) -> Rejection {
    tracing::info!(operation, gate = rejection.gate(), reason = %rejection, "request rejected");
    rejection
}

// ============================================================================
// TESTS
// ============================================================================
