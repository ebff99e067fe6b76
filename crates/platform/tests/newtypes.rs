//! Type system enforcement tests for audio domain newtypes.
//! These newtypes keep out-of-range volumes and track 0 away from the module.

// ── Volume ───────────────────────────────────────────────────────────────────

#[test]
fn volume_clamped_caps_at_30() {
    use platform::Volume;
    assert_eq!(Volume::clamped(31).get(), 30, "Volume::clamped(31) should clamp to 30");
    assert_eq!(Volume::clamped(1000).get(), 30);
}

#[test]
fn volume_clamped_floors_at_0() {
    use platform::Volume;
    assert_eq!(Volume::clamped(-1).get(), 0);
    assert_eq!(Volume::clamped(-250).get(), 0);
}

#[test]
fn volume_clamped_keeps_in_range_values() {
    use platform::Volume;
    assert_eq!(Volume::clamped(0).get(), 0);
    assert_eq!(Volume::clamped(17).get(), 17);
    assert_eq!(Volume::clamped(30).get(), 30);
}

#[test]
fn volume_try_new_rejects_out_of_range() {
    use platform::Volume;
    let err = Volume::try_new(31).unwrap_err();
    assert_eq!(err.value, 31);
    assert_eq!(err.min, 0);
    assert_eq!(err.max, 30);
    assert!(Volume::try_new(-1).is_err());
    assert!(Volume::try_new(256).is_err());
}

#[test]
fn volume_try_new_accepts_valid_range() {
    use platform::Volume;
    assert!(Volume::try_new(0).is_ok());
    assert!(Volume::try_new(15).is_ok());
    assert!(Volume::try_new(30).is_ok());
}

#[test]
fn volume_is_one_byte() {
    use platform::Volume;
    assert_eq!(core::mem::size_of::<Volume>(), 1);
}

// ── TrackIndex ───────────────────────────────────────────────────────────────

#[test]
fn track_index_rejects_zero() {
    use platform::TrackIndex;
    assert!(TrackIndex::new(0).is_none(), "track 0 is not playable");
}

#[test]
fn track_index_accepts_positive() {
    use platform::TrackIndex;
    assert_eq!(TrackIndex::new(1).map(TrackIndex::get), Some(1));
    assert_eq!(TrackIndex::new(u32::MAX).map(TrackIndex::get), Some(u32::MAX));
}

#[test]
fn track_index_option_is_niche_optimised() {
    use platform::TrackIndex;
    assert_eq!(
        core::mem::size_of::<Option<TrackIndex>>(),
        core::mem::size_of::<u32>()
    );
}
