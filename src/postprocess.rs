/*
MIT License

Copyright (c) 2024 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Postprocessing for the onsets you get from [`crate::OnsetDetector`].
//! How convenient!
//!
//! Both filters are pure: they return a new sequence and leave their
//! input untouched.

use crate::onset::Onset;

/// Thins onsets so that consecutive onsets are separated by at least
/// `gap_ms` milliseconds. Expects the time-ordered sequence the detector
/// produces.
///
/// The sequence is folded with a single surviving incumbent: a candidate
/// at least `gap_ms` behind the incumbent is kept and becomes the new
/// incumbent; a closer candidate challenges it by energy, where equal
/// energies keep the earlier onset. A whole run of close-together onsets
/// thus competes against one incumbent instead of pairwise against each
/// other.
///
/// Thinning an already thinned sequence with the same gap returns it
/// unchanged.
#[must_use]
pub fn thin_by_min_gap(onsets: &[Onset], gap_ms: u32) -> Vec<Onset> {
    let mut iter = onsets.iter().copied();
    let mut survivor = match iter.next() {
        Some(first) => first,
        None => return Vec::new(),
    };

    let mut thinned = Vec::new();
    for candidate in iter {
        if candidate.time_ms - survivor.time_ms >= gap_ms {
            thinned.push(survivor);
            survivor = candidate;
        } else if candidate.energy > survivor.energy {
            survivor = candidate;
        }
    }
    thinned.push(survivor);

    thinned
}

/// Filters onsets by energy: keeps exactly those whose energy lies in the
/// open interval `(minimum, maximum)`. Order-preserving; does not
/// re-establish any minimum gap between the survivors.
#[must_use]
pub fn filter_by_energy(onsets: &[Onset], minimum: f32, maximum: f32) -> Vec<Onset> {
    onsets
        .iter()
        .copied()
        .filter(|onset| onset.energy > minimum && onset.energy < maximum)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn onset(time_ms: u32, energy: f32) -> Onset {
        Onset { time_ms, energy }
    }

    #[test]
    fn thinning_keeps_well_separated_onsets() {
        let onsets = [onset(0, 0.2), onset(500, 1.0), onset(1200, 0.7)];
        check!(thin_by_min_gap(&onsets, 100) == onsets);
    }

    #[test]
    fn thinning_of_empty_and_single_sequences() {
        check!(thin_by_min_gap(&[], 100).is_empty());
        let single = [onset(40, 1.0)];
        check!(thin_by_min_gap(&single, 100) == single);
    }

    #[test]
    fn a_run_of_weak_onsets_competes_against_one_incumbent() {
        // All candidates lie within the gap of the first onset, and none
        // beats its energy. Pairwise-adjacent comparison would let the
        // window slide forward with every candidate; the fold must not.
        let onsets = [
            onset(0, 0.5),
            onset(30, 0.4),
            onset(60, 0.45),
            onset(90, 0.3),
        ];
        check!(thin_by_min_gap(&onsets, 100) == [onset(0, 0.5)]);
    }

    #[test]
    fn a_stronger_challenger_takes_over_as_incumbent() {
        let onsets = [onset(0, 0.5), onset(30, 0.8), onset(140, 0.6)];
        // 30 beats 0 by energy; 140 is ≥ 100 ms behind the new incumbent.
        check!(thin_by_min_gap(&onsets, 100) == [onset(30, 0.8), onset(140, 0.6)]);
    }

    #[test]
    fn equal_energies_keep_the_earlier_onset() {
        let onsets = [onset(0, 0.5), onset(50, 0.5)];
        check!(thin_by_min_gap(&onsets, 100) == [onset(0, 0.5)]);
    }

    #[test]
    fn thinning_is_idempotent() {
        let onsets = [
            onset(0, 0.3),
            onset(40, 0.9),
            onset(80, 0.2),
            onset(250, 0.6),
            onset(260, 0.61),
            onset(500, 1.0),
        ];
        let once = thin_by_min_gap(&onsets, 120);
        let twice = thin_by_min_gap(&once, 120);
        check!(once == twice);
    }

    #[test]
    fn energy_filter_uses_an_open_interval() {
        let onsets = [
            onset(0, 0.1),
            onset(100, 0.5),
            onset(200, 0.9),
            onset(300, 1.0),
        ];
        let filtered = filter_by_energy(&onsets, 0.1, 1.0);
        check!(filtered == [onset(100, 0.5), onset(200, 0.9)]);
    }

    #[test]
    fn energy_filter_is_idempotent_and_order_preserving() {
        let onsets = [onset(0, 0.4), onset(100, 0.8), onset(200, 0.6)];
        let once = filter_by_energy(&onsets, 0.5, 1.0);
        let twice = filter_by_energy(&once, 0.5, 1.0);
        check!(once == twice);
        check!(once == [onset(100, 0.8), onset(200, 0.6)]);
    }

    #[test]
    fn filter_order_relative_to_thinning_matters() {
        // Thinning first lets the strong middle onset eliminate its weak
        // neighbor; filtering first removes the strong onset before it
        // can compete, so the weak neighbor survives thinning.
        let onsets = [onset(0, 0.4), onset(50, 0.95), onset(200, 0.5)];

        let thinned_then_filtered =
            filter_by_energy(&thin_by_min_gap(&onsets, 100), 0.3, 0.9);
        let filtered_then_thinned =
            thin_by_min_gap(&filter_by_energy(&onsets, 0.3, 0.9), 100);

        check!(thinned_then_filtered == [onset(200, 0.5)]);
        check!(
            filtered_then_thinned == [onset(0, 0.4), onset(200, 0.5)]
        );
    }
}
