use crate::policy::OrderPolicy;
use crate::signature::build_signature;
use membersort_types::decl::{Declaration, Member};
use std::cmp::Ordering;

/// A declaration's member data paired with its rank under a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedMember {
    pub member: Member,
    pub rank: Option<usize>,
}

/// Total pre-order over the sibling declarations of one scope.
///
/// Only orders; moving anything is left to the caller's stable sort.
#[derive(Debug, Clone, Copy)]
pub struct MemberComparator<'a> {
    policy: &'a OrderPolicy,
}

impl<'a> MemberComparator<'a> {
    pub fn new(policy: &'a OrderPolicy) -> Self {
        Self { policy }
    }

    pub fn rank_member(&self, decl: &Declaration) -> RankedMember {
        let member = build_signature(decl);
        let rank = self.policy.rank(&member.signature);
        RankedMember { member, rank }
    }

    pub fn compare(&self, a: &Declaration, b: &Declaration) -> Ordering {
        self.compare_members(&self.rank_member(a), &self.rank_member(b))
    }

    /// Lower rank first; equal ranks tie-break on name only when the policy asks for it.
    pub fn compare_members(&self, a: &RankedMember, b: &RankedMember) -> Ordering {
        if a.rank == b.rank {
            if self.policy.order_by_name() {
                a.member.name.cmp(&b.member.name)
            } else {
                Ordering::Equal
            }
        } else {
            a.rank.cmp(&b.rank)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(order_by_name: bool) -> OrderPolicy {
        OrderPolicy::new(
            vec!["public method".to_string(), "public variable".to_string()],
            order_by_name,
        )
    }

    #[test]
    fn same_rank_without_name_ordering_is_equal() {
        let p = policy(false);
        let cmp = MemberComparator::new(&p);
        assert_eq!(
            cmp.compare(
                &Declaration::method("b", &["public"]),
                &Declaration::method("a", &["public"])
            ),
            Ordering::Equal
        );
    }

    #[test]
    fn same_rank_with_name_ordering_compares_names() {
        let p = policy(true);
        let cmp = MemberComparator::new(&p);
        assert_eq!(
            cmp.compare(
                &Declaration::method("b", &["public"]),
                &Declaration::method("a", &["public"])
            ),
            Ordering::Greater
        );
    }

    #[test]
    fn rank_decides_before_name() {
        let p = policy(true);
        let cmp = MemberComparator::new(&p);
        assert_eq!(
            cmp.compare(
                &Declaration::method("z", &["public"]),
                &Declaration::field("a", &["public"])
            ),
            Ordering::Less
        );
    }

    #[test]
    fn unranked_sorts_before_ranked() {
        let p = policy(false);
        let cmp = MemberComparator::new(&p);
        let unranked = Declaration::method("m", &["private"]);
        let ranked = Declaration::method("m", &["public"]);
        assert_eq!(cmp.compare(&unranked, &ranked), Ordering::Less);
        assert_eq!(cmp.compare(&ranked, &unranked), Ordering::Greater);
    }

    #[test]
    fn two_unranked_members_tie_break_on_name() {
        let p = policy(true);
        let cmp = MemberComparator::new(&p);
        assert_eq!(
            cmp.compare(
                &Declaration::method("a", &["private"]),
                &Declaration::field("b", &["private"])
            ),
            Ordering::Less
        );
    }

    #[test]
    fn unknown_declarations_compare_equal_to_each_other() {
        let p = policy(true);
        let cmp = MemberComparator::new(&p);
        assert_eq!(
            cmp.compare(&Declaration::Unknown, &Declaration::Unknown),
            Ordering::Equal
        );
    }
}
