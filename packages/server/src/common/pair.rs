//! Canonical member pairs.
//!
//! Every symmetric relationship (match, chat) is stored once under the
//! canonical ordering of its two member ids: `lower` sorts strictly before
//! `higher`. `Uuid` byte order coincides with lexicographic order of the
//! hyphenated string form, and Postgres `uuid` comparison agrees with both,
//! so the ordering picked here can never disagree with the database's
//! `CHECK (lower_member_id < higher_member_id)` constraints.

use crate::common::MemberId;

/// Which slot of a canonical pair a member occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSide {
    Lower,
    Higher,
}

/// An unordered pair of distinct members in canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberPair {
    lower: MemberId,
    higher: MemberId,
}

impl MemberPair {
    /// Canonicalizes two member ids. Returns `None` when both ids are the
    /// same member, so constructing a pair doubles as the self-pair check.
    pub fn new(a: MemberId, b: MemberId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self {
                lower: a,
                higher: b,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                lower: b,
                higher: a,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn lower(&self) -> MemberId {
        self.lower
    }

    pub fn higher(&self) -> MemberId {
        self.higher
    }

    /// The slot `member` occupies, or `None` if it is not part of the pair.
    pub fn side_of(&self, member: MemberId) -> Option<PairSide> {
        if member == self.lower {
            Some(PairSide::Lower)
        } else if member == self.higher {
            Some(PairSide::Higher)
        } else {
            None
        }
    }

    /// Stable advisory-lock key for this pair.
    ///
    /// Derived from the canonical ordering, so both submission directions
    /// and every operation touching the pair contend on the same
    /// `pg_advisory_xact_lock` key. Distinct pairs may collide; a collision
    /// only serializes two unrelated transitions, it never breaks one.
    pub fn lock_key(&self) -> i64 {
        fn fold(u: u128) -> u64 {
            (u as u64) ^ ((u >> 64) as u64)
        }
        let lower = fold(self.lower.into_uuid().as_u128());
        let higher = fold(self.higher.into_uuid().as_u128());
        lower.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(higher) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn member(s: &str) -> MemberId {
        MemberId::from_uuid(Uuid::parse_str(s).unwrap())
    }

    #[test]
    fn test_canonicalizes_both_directions() {
        let a = MemberId::new();
        let b = MemberId::new();
        let ab = MemberPair::new(a, b).unwrap();
        let ba = MemberPair::new(b, a).unwrap();
        assert_eq!(ab, ba);
        assert!(ab.lower() < ab.higher());
    }

    #[test]
    fn test_rejects_self_pair() {
        let a = MemberId::new();
        assert!(MemberPair::new(a, a).is_none());
    }

    #[test]
    fn test_ordering_matches_string_form() {
        let a = member("00000000-0000-7000-8000-00000000000a");
        let b = member("10000000-0000-7000-8000-000000000001");
        let pair = MemberPair::new(b, a).unwrap();
        assert_eq!(pair.lower(), a);
        assert!(pair.lower().to_string() < pair.higher().to_string());
    }

    #[test]
    fn test_side_of() {
        let a = MemberId::new();
        let b = MemberId::new();
        let c = MemberId::new();
        let pair = MemberPair::new(a, b).unwrap();

        assert_eq!(pair.side_of(pair.lower()), Some(PairSide::Lower));
        assert_eq!(pair.side_of(pair.higher()), Some(PairSide::Higher));
        assert_eq!(pair.side_of(c), None);
    }

    #[test]
    fn test_lock_key_is_direction_independent() {
        let a = MemberId::new();
        let b = MemberId::new();
        let ab = MemberPair::new(a, b).unwrap();
        let ba = MemberPair::new(b, a).unwrap();
        assert_eq!(ab.lock_key(), ba.lock_key());
    }

    #[test]
    fn test_lock_key_differs_for_distinct_pairs() {
        let a = MemberId::new();
        let b = MemberId::new();
        let c = MemberId::new();
        let ab = MemberPair::new(a, b).unwrap();
        let ac = MemberPair::new(a, c).unwrap();
        assert_ne!(ab.lock_key(), ac.lock_key());
    }
}
