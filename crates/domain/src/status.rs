// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status vocabularies for dogs, adoptees and adoption processes.
//!
//! Every status is stored as its snake_case string form and parsed back
//! through `FromStr`. Status transitions are caretaker-initiated only; the
//! system never advances a status based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Adoption eligibility phase shared by dogs and adoptees.
///
/// Dogs may hold any of the five values. Adoptees are constrained to
/// `Fit`, `Unfit` and `Trial`: `Adopted` and `Unspecified` belong to the
/// dog side of the relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionStatus {
    /// Available for adoption.
    Fit,
    /// Not eligible for adoption.
    Unfit,
    /// Currently part of an active evaluation.
    Trial,
    /// Adopted; the dog has an owner on file.
    Adopted,
    /// Eligibility has not been assessed yet.
    #[default]
    Unspecified,
}

impl AdoptionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Unfit => "unfit",
            Self::Trial => "trial",
            Self::Adopted => "adopted",
            Self::Unspecified => "unspecified",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "fit" => Ok(Self::Fit),
            "unfit" => Ok(Self::Unfit),
            "trial" => Ok(Self::Trial),
            "adopted" => Ok(Self::Adopted),
            "unspecified" => Ok(Self::Unspecified),
            _ => Err(DomainError::InvalidChoice {
                kind: "adoption status",
                value: s.to_string(),
            }),
        }
    }

    /// Returns true if this status forbids opening a new adoption process.
    #[must_use]
    pub const fn blocks_new_process(&self) -> bool {
        matches!(self, Self::Unfit | Self::Unspecified | Self::Adopted)
    }

    /// Returns true if this status is permitted for an adoptee.
    ///
    /// An adoptee never holds `Adopted` or `Unspecified`: when a dog is
    /// successfully placed, the adoptee returns to `Fit` and the `Adopted`
    /// semantic lives on the dog.
    #[must_use]
    pub const fn valid_for_adoptee(&self) -> bool {
        matches!(self, Self::Fit | Self::Unfit | Self::Trial)
    }
}

impl FromStr for AdoptionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of an adoption process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionResult {
    /// The process is under evaluation.
    #[default]
    Evaluation,
    /// The process concluded successfully; the dog was placed.
    Approved,
    /// The process concluded without a placement (or was force-closed).
    Rejected,
}

impl AdoptionResult {
    /// Returns the string representation of the result.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Evaluation => "evaluation",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "evaluation" => Ok(Self::Evaluation),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidChoice {
                kind: "adoption result",
                value: s.to_string(),
            }),
        }
    }

    /// Returns true if this result closes the process.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl FromStr for AdoptionResult {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for AdoptionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dog's health condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Sick,
    PassedAway,
    #[default]
    Unspecified,
}

impl HealthStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Sick => "sick",
            Self::PassedAway => "passed_away",
            Self::Unspecified => "unspecified",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "healthy" => Ok(Self::Healthy),
            "sick" => Ok(Self::Sick),
            "passed_away" => Ok(Self::PassedAway),
            "unspecified" => Ok(Self::Unspecified),
            _ => Err(DomainError::InvalidChoice {
                kind: "health status",
                value: s.to_string(),
            }),
        }
    }

    /// Returns true if a new adoption process may be opened at this status.
    ///
    /// A sick dog may still enter evaluation; a passed-away or
    /// health-unspecified dog may not.
    #[must_use]
    pub const fn allows_new_process(&self) -> bool {
        matches!(self, Self::Healthy | Self::Sick)
    }
}

impl FromStr for HealthStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dog's vaccination progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VaccinationStatus {
    NotVaccinated,
    Incomplete,
    Complete,
    #[default]
    Unspecified,
}

impl VaccinationStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotVaccinated => "not_vaccinated",
            Self::Incomplete => "incomplete",
            Self::Complete => "complete",
            Self::Unspecified => "unspecified",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "not_vaccinated" => Ok(Self::NotVaccinated),
            "incomplete" => Ok(Self::Incomplete),
            "complete" => Ok(Self::Complete),
            "unspecified" => Ok(Self::Unspecified),
            _ => Err(DomainError::InvalidChoice {
                kind: "vaccination status",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for VaccinationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// A three-valued Yes/No/Unspecified flag.
///
/// Used for microchip and castration status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TripleChoice {
    Yes,
    No,
    #[default]
    Unspecified,
}

impl TripleChoice {
    /// Returns the string representation of the flag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unspecified => "unspecified",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "unspecified" => Ok(Self::Unspecified),
            _ => Err(DomainError::InvalidChoice {
                kind: "yes/no flag",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for TripleChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// A dog's gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DogGender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl DogGender {
    /// Returns the string representation of the gender.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unspecified => "unspecified",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "unspecified" => Ok(Self::Unspecified),
            _ => Err(DomainError::InvalidChoice {
                kind: "gender",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for DogGender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Recognized breeds, with `StreetDog` as the shelter default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DogBreed {
    #[default]
    StreetDog,
    Mixed,
    GoldenRetriever,
    GermanShepherd,
    Labrador,
    Beagle,
    Bulldog,
    Pitbull,
    Husky,
    Chihuahua,
    Pomeranian,
    Other,
}

impl DogBreed {
    /// Returns the string representation of the breed.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StreetDog => "street_dog",
            Self::Mixed => "mixed",
            Self::GoldenRetriever => "golden_retriever",
            Self::GermanShepherd => "german_shepherd",
            Self::Labrador => "labrador",
            Self::Beagle => "beagle",
            Self::Bulldog => "bulldog",
            Self::Pitbull => "pitbull",
            Self::Husky => "husky",
            Self::Chihuahua => "chihuahua",
            Self::Pomeranian => "pomeranian",
            Self::Other => "other",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "street_dog" => Ok(Self::StreetDog),
            "mixed" => Ok(Self::Mixed),
            "golden_retriever" => Ok(Self::GoldenRetriever),
            "german_shepherd" => Ok(Self::GermanShepherd),
            "labrador" => Ok(Self::Labrador),
            "beagle" => Ok(Self::Beagle),
            "bulldog" => Ok(Self::Bulldog),
            "pitbull" => Ok(Self::Pitbull),
            "husky" => Ok(Self::Husky),
            "chihuahua" => Ok(Self::Chihuahua),
            "pomeranian" => Ok(Self::Pomeranian),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidChoice {
                kind: "breed",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for DogBreed {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Coat colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DogColor {
    Black,
    White,
    Gray,
    Brown,
    Tan,
    Cream,
    Golden,
    Red,
    Blue,
    MultiColor,
    Spotted,
    Striped,
}

impl DogColor {
    /// Returns the string representation of the color.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Gray => "gray",
            Self::Brown => "brown",
            Self::Tan => "tan",
            Self::Cream => "cream",
            Self::Golden => "golden",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::MultiColor => "multi_color",
            Self::Spotted => "spotted",
            Self::Striped => "striped",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "black" => Ok(Self::Black),
            "white" => Ok(Self::White),
            "gray" => Ok(Self::Gray),
            "brown" => Ok(Self::Brown),
            "tan" => Ok(Self::Tan),
            "cream" => Ok(Self::Cream),
            "golden" => Ok(Self::Golden),
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            "multi_color" => Ok(Self::MultiColor),
            "spotted" => Ok(Self::Spotted),
            "striped" => Ok(Self::Striped),
            _ => Err(DomainError::InvalidChoice {
                kind: "color",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for DogColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Why a dog entered the shelter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntakeReason {
    /// Rescued from the street or surrendered.
    #[default]
    Rescue,
    /// Boarded for training on behalf of an existing owner.
    Training,
}

impl IntakeReason {
    /// Returns the string representation of the intake reason.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rescue => "rescue",
            Self::Training => "training",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "rescue" => Ok(Self::Rescue),
            "training" => Ok(Self::Training),
            _ => Err(DomainError::InvalidChoice {
                kind: "intake reason",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for IntakeReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
