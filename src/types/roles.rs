// src/types/roles.rs
use crate::utils::normalize_role_key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A contribution a recruiter can make to a single placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruiterRole {
    CandidateRecruiter,
    JobOwner,
    CompanyRecruiter,
    CandidateSourcer,
    CompanySourcer,
}

impl RecruiterRole {
    pub const COUNT: usize = 5;

    /// Canonical order, matching the columns of the rate table.
    pub const ALL: [RecruiterRole; Self::COUNT] = [
        RecruiterRole::CandidateRecruiter,
        RecruiterRole::JobOwner,
        RecruiterRole::CompanyRecruiter,
        RecruiterRole::CandidateSourcer,
        RecruiterRole::CompanySourcer,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecruiterRole::CandidateRecruiter => "candidate_recruiter",
            RecruiterRole::JobOwner => "job_owner",
            RecruiterRole::CompanyRecruiter => "company_recruiter",
            RecruiterRole::CandidateSourcer => "candidate_sourcer",
            RecruiterRole::CompanySourcer => "company_sourcer",
        }
    }

    pub fn accepted_names() -> String {
        Self::ALL
            .iter()
            .map(|role| role.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for RecruiterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecruiterRole {
    type Err = anyhow::Error;

    /// Accepts wire names, kebab-case and display labels, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_role_key(s);
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == key)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown recruiter role: '{}'. Use one of: {}",
                    s.trim(),
                    Self::accepted_names()
                )
            })
    }
}

/// Display metadata for a role. Carries no computation semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleMeta {
    pub label: &'static str,
    pub description: &'static str,
}

/// Set of roles held on one deal, stored as a bitset over [`RecruiterRole`].
///
/// Iteration always yields roles in canonical order, so two sets built from
/// the same roles in a different order are indistinguishable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<RecruiterRole>", into = "Vec<RecruiterRole>")]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn empty() -> Self {
        RoleSet(0)
    }

    pub fn all() -> Self {
        RecruiterRole::ALL.into_iter().collect()
    }

    const fn bit(role: RecruiterRole) -> u8 {
        1 << role.index()
    }

    pub fn contains(&self, role: RecruiterRole) -> bool {
        self.0 & Self::bit(role) != 0
    }

    /// Returns `true` if the role was not already present.
    pub fn insert(&mut self, role: RecruiterRole) -> bool {
        let added = !self.contains(role);
        self.0 |= Self::bit(role);
        added
    }

    /// Returns `true` if the role was present.
    pub fn remove(&mut self, role: RecruiterRole) -> bool {
        let removed = self.contains(role);
        self.0 &= !Self::bit(role);
        removed
    }

    /// Flips membership of `role`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, role: RecruiterRole) -> bool {
        self.0 ^= Self::bit(role);
        self.contains(role)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = RecruiterRole> + '_ {
        RecruiterRole::ALL
            .into_iter()
            .filter(move |role| self.contains(*role))
    }

    pub fn to_vec(&self) -> Vec<RecruiterRole> {
        self.iter().collect()
    }
}

impl FromIterator<RecruiterRole> for RoleSet {
    fn from_iter<I: IntoIterator<Item = RecruiterRole>>(iter: I) -> Self {
        let mut set = RoleSet::empty();
        set.extend(iter);
        set
    }
}

impl Extend<RecruiterRole> for RoleSet {
    fn extend<I: IntoIterator<Item = RecruiterRole>>(&mut self, iter: I) {
        for role in iter {
            self.insert(role);
        }
    }
}

impl From<Vec<RecruiterRole>> for RoleSet {
    fn from(roles: Vec<RecruiterRole>) -> Self {
        roles.into_iter().collect()
    }
}

impl From<RoleSet> for Vec<RecruiterRole> {
    fn from(set: RoleSet) -> Self {
        set.to_vec()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(none)");
        }
        let names: Vec<&str> = self.iter().map(RecruiterRole::as_str).collect();
        f.write_str(&names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_accepts_common_spellings() {
        assert_eq!(
            "candidate_recruiter".parse::<RecruiterRole>().unwrap(),
            RecruiterRole::CandidateRecruiter
        );
        assert_eq!(
            "Job Owner".parse::<RecruiterRole>().unwrap(),
            RecruiterRole::JobOwner
        );
        assert_eq!(
            " company-sourcer ".parse::<RecruiterRole>().unwrap(),
            RecruiterRole::CompanySourcer
        );
        assert_eq!(
            "CANDIDATE_SOURCER".parse::<RecruiterRole>().unwrap(),
            RecruiterRole::CandidateSourcer
        );
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = "hiring_manager".parse::<RecruiterRole>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("hiring_manager"));
        assert!(message.contains("candidate_recruiter"));
    }

    #[test]
    fn test_role_serde_uses_wire_names() {
        let json = serde_json::to_string(&RecruiterRole::CompanyRecruiter).unwrap();
        assert_eq!(json, "\"company_recruiter\"");

        let role: RecruiterRole = serde_json::from_str("\"job_owner\"").unwrap();
        assert_eq!(role, RecruiterRole::JobOwner);

        assert!(serde_json::from_str::<RecruiterRole>("\"jobOwner\"").is_err());
    }

    #[test]
    fn test_role_set_deduplicates() {
        let set: RoleSet = vec![
            RecruiterRole::JobOwner,
            RecruiterRole::JobOwner,
            RecruiterRole::CandidateRecruiter,
        ]
        .into();

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.to_vec(),
            vec![RecruiterRole::CandidateRecruiter, RecruiterRole::JobOwner]
        );
    }

    #[test]
    fn test_role_set_toggle_twice_restores() {
        let mut set: RoleSet = [RecruiterRole::CandidateRecruiter].into_iter().collect();
        let original = set;

        assert!(set.toggle(RecruiterRole::JobOwner));
        assert!(set.contains(RecruiterRole::JobOwner));
        assert!(!set.toggle(RecruiterRole::JobOwner));
        assert_eq!(set, original);
    }

    #[test]
    fn test_role_set_insert_remove() {
        let mut set = RoleSet::empty();
        assert!(set.is_empty());
        assert!(set.insert(RecruiterRole::CompanySourcer));
        assert!(!set.insert(RecruiterRole::CompanySourcer));
        assert!(set.remove(RecruiterRole::CompanySourcer));
        assert!(!set.remove(RecruiterRole::CompanySourcer));
        assert!(set.is_empty());
        assert_eq!(RoleSet::all().len(), RecruiterRole::COUNT);
    }

    #[test]
    fn test_role_set_serializes_in_canonical_order() {
        let set: RoleSet = vec![RecruiterRole::CompanySourcer, RecruiterRole::JobOwner].into();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["job_owner","company_sourcer"]"#);

        let parsed: RoleSet =
            serde_json::from_str(r#"["company_sourcer","job_owner","job_owner"]"#).unwrap();
        assert_eq!(parsed, set);
    }
}
