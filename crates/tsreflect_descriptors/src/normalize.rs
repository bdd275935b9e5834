//! Union normalization.
//!
//! The checker expands `boolean` into `true | false` inside unions; the
//! descriptor encoding wants the collapsed form back. Normalization
//! partitions members into the boolean family and the rest, collapses the
//! boolean partition when it covers both literals (or already contains a
//! plain `Boolean`), and keeps everything else in its original order.

use crate::{DescriptorKind, TypeDescriptor};

/// Normalize the member list of a union descriptor. Idempotent.
pub fn normalize_union(types: Vec<TypeDescriptor<'_>>) -> Vec<TypeDescriptor<'_>> {
    let (booleans, mut rest): (Vec<_>, Vec<_>) = types
        .into_iter()
        .partition(|t| t.kind.is_boolean_family());

    rest.extend(normalize_booleans(booleans));
    rest
}

fn normalize_booleans(types: Vec<TypeDescriptor<'_>>) -> Vec<TypeDescriptor<'_>> {
    let mut has_true = false;
    let mut has_false = false;
    let mut has_boolean = false;

    for t in &types {
        match t.kind {
            DescriptorKind::TrueLiteral => has_true = true,
            DescriptorKind::FalseLiteral => has_false = true,
            DescriptorKind::Boolean => has_boolean = true,
            _ => {}
        }
    }

    if has_boolean || (has_true && has_false) {
        vec![TypeDescriptor::new(DescriptorKind::Boolean)]
    } else {
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(kind: DescriptorKind<'static>) -> TypeDescriptor<'static> {
        TypeDescriptor::new(kind)
    }

    fn kinds(types: &[TypeDescriptor<'_>]) -> Vec<&'static str> {
        types.iter().map(|t| t.kind.tag_name()).collect()
    }

    #[test]
    fn true_and_false_collapse_to_boolean() {
        let result = normalize_union(vec![d(DescriptorKind::TrueLiteral), d(DescriptorKind::FalseLiteral)]);
        assert_eq!(kinds(&result), ["Boolean"]);
    }

    #[test]
    fn plain_boolean_absorbs_literals() {
        let result = normalize_union(vec![d(DescriptorKind::Boolean), d(DescriptorKind::TrueLiteral)]);
        assert_eq!(kinds(&result), ["Boolean"]);
        let result = normalize_union(vec![d(DescriptorKind::Boolean)]);
        assert_eq!(kinds(&result), ["Boolean"]);
    }

    #[test]
    fn lone_true_literal_is_not_promoted() {
        let result = normalize_union(vec![d(DescriptorKind::TrueLiteral)]);
        assert_eq!(kinds(&result), ["TrueLiteral"]);
        let result = normalize_union(vec![d(DescriptorKind::FalseLiteral)]);
        assert_eq!(kinds(&result), ["FalseLiteral"]);
    }

    #[test]
    fn non_boolean_members_keep_relative_order() {
        let result = normalize_union(vec![
            d(DescriptorKind::String),
            d(DescriptorKind::TrueLiteral),
            d(DescriptorKind::Number),
            d(DescriptorKind::FalseLiteral),
        ]);
        assert_eq!(kinds(&result), ["String", "Number", "Boolean"]);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_union(vec![
            d(DescriptorKind::Undefined),
            d(DescriptorKind::TrueLiteral),
            d(DescriptorKind::FalseLiteral),
        ]);
        let twice = normalize_union(once.clone());
        assert_eq!(kinds(&once), kinds(&twice));

        let untouched = normalize_union(vec![d(DescriptorKind::String), d(DescriptorKind::TrueLiteral)]);
        let again = normalize_union(untouched.clone());
        assert_eq!(kinds(&untouched), kinds(&again));
    }
}
