//! Statistical series computed from the loaded tracks.
//!
//! Everything here is a pure function of its inputs: the UI asks for a
//! series per render pass and nothing is cached or mutated.

mod density;
mod histogram;
mod summary;

pub use density::density;
pub use histogram::{Bin, Histogram, histogram};
pub use summary::Summary;

use crate::dataset::Track;

/// Split popularity values into (explicit, non-explicit) groups.
pub fn split_by_explicit(tracks: &[Track]) -> (Vec<f64>, Vec<f64>) {
    let mut explicit: Vec<f64> = Vec::new();
    let mut clean: Vec<f64> = Vec::new();

    for track in tracks {
        if track.explicit {
            explicit.push(track.popularity);
        } else {
            clean.push(track.popularity);
        }
    }

    (explicit, clean)
}

/// The (min, max) popularity over all tracks, or `None` when there are none.
///
/// Both comparison groups are binned over this shared range so their bars
/// and profiles line up on identical edges.
pub fn popularity_range(tracks: &[Track]) -> Option<(f64, f64)> {
    let mut iter = tracks.iter().map(|t| t.popularity);
    let first = iter.next()?;
    let mut lo = first;
    let mut hi = first;
    for v in iter {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    Some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::TrackDuration;

    fn track(popularity: f64, explicit: bool) -> Track {
        Track {
            name: "t".to_string(),
            popularity,
            explicit,
            duration: TrackDuration::from_ms(1_000).unwrap(),
        }
    }

    #[test]
    fn split_by_explicit_partitions_popularity() {
        let tracks = vec![track(10.0, true), track(20.0, false), track(30.0, true)];
        let (explicit, clean) = split_by_explicit(&tracks);
        assert_eq!(explicit, vec![10.0, 30.0]);
        assert_eq!(clean, vec![20.0]);
    }

    #[test]
    fn popularity_range_spans_all_tracks() {
        let tracks = vec![track(42.0, true), track(7.0, false), track(63.0, false)];
        assert_eq!(popularity_range(&tracks), Some((7.0, 63.0)));
        assert_eq!(popularity_range(&[]), None);
    }
}
