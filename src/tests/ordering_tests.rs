use super::*;

fn reference_handles() -> Vec<VersionHandle> {
    ReferencePoint::ALL.iter().map(|r| r.handle()).collect()
}

#[test]
fn test_reference_table_matches_variant_order() {
    for (index, reference) in ReferencePoint::ALL.iter().enumerate() {
        assert_eq!(REFERENCE_TABLE[index].0, *reference);
    }
    assert_eq!(REFERENCE_TABLE.len(), ReferencePoint::ALL.len());
}

#[test]
fn test_release_order_is_strictly_ascending() {
    // Netty-era ids were checked against the published protocol list and
    // never go backwards, which keeps the numeric fallback consistent with
    // table ranks.
    for pair in RELEASE_ORDER.windows(2) {
        assert!(pair[0] < pair[1], "{} should precede {}", pair[0], pair[1]);
    }
}

#[test]
fn test_every_reference_point_is_in_release_table() {
    for reference in ReferencePoint::ALL {
        assert!(
            VersionOrdering::is_known(reference.protocol_id()),
            "{reference} missing from release order"
        );
    }
}

#[test]
fn test_compare_is_reflexive_and_antisymmetric() {
    let handles = reference_handles();
    for a in &handles {
        assert_eq!(VersionOrdering::compare(a, a), VersionOrder::Equal);
        for b in &handles {
            let forward = VersionOrdering::compare(a, b);
            let backward = VersionOrdering::compare(b, a);
            assert_eq!(forward, backward.reverse());
            assert_eq!(forward == VersionOrder::Newer, backward == VersionOrder::Older);
        }
    }
}

#[test]
fn test_compare_is_transitive_over_reference_set() {
    let handles = reference_handles();
    for a in &handles {
        for b in &handles {
            for c in &handles {
                if VersionOrdering::compare(a, b) == VersionOrder::Older
                    && VersionOrdering::compare(b, c) == VersionOrder::Older
                {
                    assert_eq!(VersionOrdering::compare(a, c), VersionOrder::Older);
                }
            }
        }
    }
}

#[test]
fn test_threshold_helpers() {
    let v1_8 = VersionHandle::new("1.8.9", 47);
    assert!(VersionOrdering::equal_to(&v1_8, ReferencePoint::V1_8));
    assert!(VersionOrdering::older_than_or_equal(&v1_8, ReferencePoint::V1_8));
    assert!(VersionOrdering::newer_than_or_equal(&v1_8, ReferencePoint::V1_8));
    assert!(VersionOrdering::older_than_or_equal(&v1_8, ReferencePoint::V1_16));
    assert!(!VersionOrdering::newer_than_or_equal(&v1_8, ReferencePoint::V1_16));
    assert!(!VersionOrdering::older_than_or_equal(&v1_8, ReferencePoint::V1_7_6));

    let v1_7_10 = VersionHandle::new("1.7.10", 5);
    assert!(VersionOrdering::older_than_or_equal(&v1_7_10, ReferencePoint::V1_7_6));
}

#[test]
fn test_unlisted_ids_fall_back_to_numeric_order() {
    assert!(!VersionOrdering::is_known(78));
    // Raw ids only; handles from other eras never reach this comparison.
    assert_eq!(VersionOrdering::compare_ids(78, 47), VersionOrder::Newer);
    assert_eq!(VersionOrdering::compare_ids(800, 767), VersionOrder::Newer);
    assert_eq!(VersionOrdering::compare_ids(-1, 4), VersionOrder::Older);
    assert_eq!(VersionOrdering::compare_ids(78, 78), VersionOrder::Equal);
}

#[test]
fn test_pre_netty_release_sorts_before_netty_releases() {
    use crate::version::ReleaseChannel;

    let legacy = VersionHandle::with_channel("1.6.4", 78, ReleaseChannel::ReleaseLegacy);
    let beta = VersionHandle::with_channel("b1.7.3", 14, ReleaseChannel::Beta);

    for reference in ReferencePoint::ALL {
        assert!(VersionOrdering::older_than_or_equal(&legacy, reference), "{reference}");
        assert!(!VersionOrdering::newer_than_or_equal(&legacy, reference), "{reference}");
        assert!(!VersionOrdering::equal_to(&legacy, reference), "{reference}");
    }
    assert_eq!(VersionOrdering::compare(&beta, &legacy), VersionOrder::Older);
    assert_eq!(
        VersionOrdering::compare(&legacy, &ReferencePoint::V1_8.handle()),
        VersionOrder::Older
    );
}

#[test]
fn test_reference_point_parsing() {
    assert_eq!("1.8".parse::<ReferencePoint>().ok(), Some(ReferencePoint::V1_8));
    assert_eq!(
        "1.7.6-1.7.10".parse::<ReferencePoint>().ok(),
        Some(ReferencePoint::V1_7_6)
    );
    assert_eq!(" 1.16 ".parse::<ReferencePoint>().ok(), Some(ReferencePoint::V1_16));
    assert!(matches!(
        "1.99".parse::<ReferencePoint>(),
        Err(CompatError::UnknownReferencePoint(name)) if name == "1.99"
    ));
}
