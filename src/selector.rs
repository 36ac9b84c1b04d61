//! Weighted winner selection and rotation targeting.
//!
//! Outcomes partition the draw domain `[0, 100)` by cumulative weight, and the
//! wheel face by the same proportions of a full turn, starting at 0° and
//! accumulating counter-clockwise. The wheel itself turns clockwise under a
//! pointer fixed at the top, so landing wheel angle `a` under the pointer
//! means a rotation congruent to `360 - a`.

use anyhow::{Result, bail};
use rand::Rng;
use serde::Serialize;

use crate::models::Outcome;

pub const FULL_TURN: f64 = 360.0;
pub const DRAW_DOMAIN: f64 = 100.0;
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Presentation constants for rotation targeting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorParams {
    /// Distance kept from each edge of the winning arc, in degrees.
    pub edge_margin_deg: f64,
    /// Full turns added on top of the delta to the target. Never below one.
    pub extra_revolutions: u32,
}

impl Default for SelectorParams {
    fn default() -> Self {
        Self {
            edge_margin_deg: 5.0,
            extra_revolutions: 5,
        }
    }
}

/// One uniform sample from `[0, 100)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Draw(f64);

impl Draw {
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && (0.0..DRAW_DOMAIN).contains(&value)).then_some(Self(value))
    }

    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0.0..DRAW_DOMAIN))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Angular span `[start, end)` of one outcome on the wheel face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub start: f64,
    pub end: f64,
}

impl Arc {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        self.start + self.width() / 2.0
    }

    pub fn contains(&self, angle: f64) -> bool {
        self.start <= angle && angle < self.end
    }

    /// Point at `fraction` of the way across the arc after pulling both edges
    /// in by `margin`. Arcs too narrow for the margin yield their midpoint,
    /// and so does a point that would sit on an edge (margin 0).
    pub fn inset_point(&self, fraction: f64, margin: f64) -> f64 {
        let margin = margin.max(0.0);
        let usable = self.width() - 2.0 * margin;
        if usable < 0.0 {
            return self.midpoint();
        }
        let point = self.start + margin + fraction.clamp(0.0, 1.0) * usable;
        if point <= self.start || point >= self.end {
            return self.midpoint();
        }
        point
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Selection {
    /// Index of the winning outcome.
    pub winner: usize,
    /// Wheel angle, in degrees, that ends up under the pointer.
    pub target_angle: f64,
    /// Absolute rotation the wheel must reach. Always past the starting rotation.
    pub target_rotation: f64,
}

fn degrees(weight: f64) -> f64 {
    weight / DRAW_DOMAIN * FULL_TURN
}

fn cumulative_before(outcomes: &[Outcome], index: usize) -> f64 {
    outcomes[..index].iter().map(Outcome::weight).sum()
}

/// The arc owned by `outcomes[index]`.
pub fn arc_of(outcomes: &[Outcome], index: usize) -> Arc {
    let start = degrees(cumulative_before(outcomes, index));
    Arc {
        start,
        end: start + degrees(outcomes[index].weight()),
    }
}

/// Index of the outcome whose half-open weight range contains `draw`.
/// A draw exactly on a boundary belongs to the later outcome.
///
/// Falls back to the last outcome when accumulated weight never passes the
/// draw, which happens when the weights sum to slightly under 100.
pub fn pick_index(outcomes: &[Outcome], draw: Draw) -> Option<usize> {
    if outcomes.is_empty() {
        return None;
    }

    let mut cumulative = 0.0;
    let found = outcomes.iter().position(|o| {
        cumulative += o.weight();
        draw.value() < cumulative
    });

    Some(found.unwrap_or(outcomes.len() - 1))
}

/// Absolute rotation reached by spinning forward from `current` so that
/// wheel angle `target_angle` stops under the pointer.
pub fn target_rotation(current: f64, target_angle: f64, extra_revolutions: u32) -> f64 {
    let base = current - current.rem_euclid(FULL_TURN);
    let revolutions = f64::from(extra_revolutions.max(1));
    base + revolutions * FULL_TURN + (FULL_TURN - target_angle)
}

/// Wheel angle sitting under the pointer at the given rotation.
pub fn angle_under_pointer(rotation: f64) -> f64 {
    (FULL_TURN - rotation.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN)
}

/// Index of the outcome whose arc covers `angle`.
pub fn outcome_at_angle(outcomes: &[Outcome], angle: f64) -> Option<usize> {
    if outcomes.is_empty() {
        return None;
    }

    let angle = angle.rem_euclid(FULL_TURN);
    let found = (0..outcomes.len()).find(|&i| arc_of(outcomes, i).contains(angle));
    Some(found.unwrap_or(outcomes.len() - 1))
}

/// Draw a winner and the rotation that lands the pointer inside its arc.
///
/// Pure in its inputs: the position inside the arc is taken from where the
/// draw fell inside the winner's weight range, so no second sample is
/// needed. Returns `None` only for an empty outcome set. Weight validity is
/// the caller's concern (see [`validate`]).
pub fn select_winner(
    outcomes: &[Outcome],
    current_rotation: f64,
    draw: Draw,
    params: &SelectorParams,
) -> Option<Selection> {
    let winner = pick_index(outcomes, draw)?;
    let weight = outcomes[winner].weight();

    let fraction = if weight > 0.0 {
        (draw.value() - cumulative_before(outcomes, winner)) / weight
    } else {
        0.5
    };

    let target_angle = arc_of(outcomes, winner).inset_point(fraction, params.edge_margin_deg);

    Some(Selection {
        winner,
        target_angle,
        target_rotation: target_rotation(current_rotation, target_angle, params.extra_revolutions),
    })
}

/// Spin precondition: a non-empty set of finite, non-negative weights
/// summing to exactly 100.
pub fn validate(outcomes: &[Outcome]) -> Result<()> {
    if outcomes.is_empty() {
        bail!("The wheel has no outcomes. Add one with 'fw outcome add'.");
    }

    if let Some(bad) = outcomes
        .iter()
        .find(|o| !o.weight().is_finite() || o.weight() < 0.0)
    {
        bail!(
            "Outcome {} has an invalid weight: {}",
            bad.id(),
            bad.weight()
        );
    }

    let total: f64 = outcomes.iter().map(Outcome::weight).sum();
    if (total - DRAW_DOMAIN).abs() > WEIGHT_EPSILON {
        bail!("Weights sum to {total}%. The sum must be exactly 100% to spin.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::{fixture, rstest};

    fn outcomes(weights: &[f64]) -> Vec<Outcome> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| Outcome::new(format!("o{i}"), format!("label {i}"), w, "#ffffff".into()))
            .collect()
    }

    fn draw(value: f64) -> Draw {
        Draw::new(value).unwrap()
    }

    #[fixture]
    fn stock() -> Vec<Outcome> {
        outcomes(&[33.0, 7.0, 20.0, 10.0, 5.0, 10.0, 1.0, 14.0])
    }

    // -- Draw --

    #[rstest]
    #[case::zero(0.0, true)]
    #[case::inside(99.999, true)]
    #[case::upper_bound(100.0, false)]
    #[case::negative(-0.1, false)]
    #[case::nan(f64::NAN, false)]
    fn draw_accepts_only_the_domain(#[case] value: f64, #[case] valid: bool) {
        assert_eq!(Draw::new(value).is_some(), valid);
    }

    #[test]
    fn sampled_draws_stay_in_domain() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let d = Draw::sample(&mut rng).value();
            assert!((0.0..DRAW_DOMAIN).contains(&d));
        }
    }

    // -- pick_index --

    // Each draw should land in the outcome whose cumulative range holds it,
    // with boundaries belonging to the later outcome.
    #[rstest]
    #[case::first(0.0, 0)]
    #[case::end_of_first(32.999, 0)]
    #[case::boundary(33.0, 1)]
    #[case::second(35.0, 1)]
    #[case::middle(50.0, 2)]
    #[case::tiny_sector(85.5, 6)]
    #[case::last(99.99, 7)]
    fn pick_index_follows_cumulative_ranges(
        stock: Vec<Outcome>,
        #[case] value: f64,
        #[case] expected: usize,
    ) {
        assert_eq!(pick_index(&stock, draw(value)), Some(expected));
    }

    #[test]
    fn zero_weight_outcomes_never_win_inside_domain() {
        let set = outcomes(&[0.0, 50.0, 0.0, 50.0]);
        assert_eq!(pick_index(&set, draw(0.0)), Some(1));
        assert_eq!(pick_index(&set, draw(50.0)), Some(3));
    }

    // Weights that drift under 100 must still produce a winner.
    #[test]
    fn drift_falls_back_to_last_outcome() {
        let set = outcomes(&[33.3, 33.3, 33.3]);
        assert_eq!(pick_index(&set, draw(99.95)), Some(2));
    }

    #[test]
    fn empty_set_has_no_winner() {
        assert_eq!(pick_index(&[], draw(10.0)), None);
        assert!(select_winner(&[], 0.0, draw(10.0), &SelectorParams::default()).is_none());
    }

    // -- arcs --

    #[rstest]
    fn arcs_tile_the_full_turn(stock: Vec<Outcome>) {
        let mut expected_start = 0.0;
        for i in 0..stock.len() {
            let arc = arc_of(&stock, i);
            assert!((arc.start - expected_start).abs() < 1e-9);
            expected_start = arc.end;
        }
        assert!((expected_start - FULL_TURN).abs() < 1e-9);
    }

    #[rstest]
    #[case::wide(Arc { start: 0.0, end: 100.0 }, 0.0, 5.0)]
    #[case::wide_far_edge(Arc { start: 0.0, end: 100.0 }, 1.0, 95.0)]
    #[case::narrow(Arc { start: 10.0, end: 16.0 }, 0.9, 13.0)]
    #[case::exact_double_margin(Arc { start: 10.0, end: 20.0 }, 0.3, 15.0)]
    fn inset_point_respects_margin(#[case] arc: Arc, #[case] fraction: f64, #[case] expected: f64) {
        assert!((arc.inset_point(fraction, 5.0) - expected).abs() < 1e-9);
    }

    // -- target_rotation --

    #[rstest]
    #[case::from_zero(0.0, 40.0, 5, 2120.0)]
    #[case::past_two_turns(725.0, 40.0, 5, 2840.0)]
    #[case::exact_turn(720.0, 90.0, 5, 2790.0)]
    #[case::zero_revolutions_clamped(359.0, 355.0, 0, 365.0)]
    fn target_rotation_spins_forward(
        #[case] current: f64,
        #[case] angle: f64,
        #[case] revolutions: u32,
        #[case] expected: f64,
    ) {
        let target = target_rotation(current, angle, revolutions);
        assert!((target - expected).abs() < 1e-9);
        assert!(target > current);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(320.0, 40.0)]
    #[case(2840.0, 40.0)]
    #[case(-90.0, 90.0)]
    fn angle_under_pointer_inverts_rotation(#[case] rotation: f64, #[case] expected: f64) {
        assert!((angle_under_pointer(rotation) - expected).abs() < 1e-9);
    }

    #[rstest]
    fn outcome_at_angle_matches_arcs(stock: Vec<Outcome>) {
        assert_eq!(outcome_at_angle(&stock, 0.0), Some(0));
        assert_eq!(outcome_at_angle(&stock, 120.0), Some(1));
        assert_eq!(outcome_at_angle(&stock, 359.9), Some(7));
        assert_eq!(outcome_at_angle(&stock, 360.0 + 150.0), Some(2));
    }

    // -- select_winner --

    // 35 falls in [33, 40), the range owned by the 7% outcome.
    #[rstest]
    fn draw_of_35_picks_the_seven_percent_outcome(stock: Vec<Outcome>) {
        let selection = select_winner(&stock, 0.0, draw(35.0), &SelectorParams::default()).unwrap();
        assert_eq!(selection.winner, 1);

        let arc = arc_of(&stock, 1);
        assert!(selection.target_angle >= arc.start + 5.0);
        assert!(selection.target_angle <= arc.end - 5.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(42.0)]
    #[case(99.999)]
    fn single_outcome_always_wins(#[case] value: f64) {
        let set = outcomes(&[100.0]);
        let selection = select_winner(&set, 0.0, draw(value), &SelectorParams::default()).unwrap();
        assert_eq!(selection.winner, 0);
        assert!(selection.target_angle >= 5.0);
        assert!(selection.target_angle <= 355.0);
        assert!(selection.target_angle > 0.0 && selection.target_angle < FULL_TURN);
    }

    #[rstest]
    #[case::start_edge(0.0, 50.0)]
    #[case::end_edge(1.0, 50.0)]
    #[case::interior(0.25, 25.0)]
    fn zero_margin_keeps_off_the_edges(#[case] fraction: f64, #[case] expected: f64) {
        let arc = Arc { start: 0.0, end: 100.0 };
        assert!((arc.inset_point(fraction, 0.0) - expected).abs() < 1e-9);
    }

    #[rstest]
    fn zero_margin_single_outcome_lands_inside() {
        let set = outcomes(&[100.0]);
        let params = SelectorParams {
            edge_margin_deg: 0.0,
            ..SelectorParams::default()
        };
        let selection = select_winner(&set, 0.0, draw(0.0), &params).unwrap();
        assert!(selection.target_angle > 0.0);
        assert!(selection.target_angle < FULL_TURN);
    }

    // A draw on a cumulative boundary with no margin must not park the
    // pointer on the edge shared with the previous outcome.
    #[rstest]
    fn zero_margin_boundary_draw_lands_inside(stock: Vec<Outcome>) {
        let params = SelectorParams {
            edge_margin_deg: 0.0,
            ..SelectorParams::default()
        };
        let selection = select_winner(&stock, 0.0, draw(33.0), &params).unwrap();
        assert_eq!(selection.winner, 1);
        let arc = arc_of(&stock, 1);
        assert!(selection.target_angle > arc.start);
        assert!(selection.target_angle < arc.end);
        assert_eq!(outcome_at_angle(&stock, selection.target_angle), Some(1));
    }

    // Starting from 725°, the result must keep spinning forward and park
    // the pointer inside the winner's inset arc.
    #[rstest]
    fn scenario_from_partial_turn(stock: Vec<Outcome>) {
        let params = SelectorParams::default();
        let selection = select_winner(&stock, 725.0, draw(11.11), &params).unwrap();
        assert_eq!(selection.winner, 0);
        assert!(selection.target_rotation > 725.0);

        let landed = angle_under_pointer(selection.target_rotation);
        assert!((landed - selection.target_angle).abs() < 1e-6);
        assert!(arc_of(&stock, 0).contains(landed));
        assert_eq!(outcome_at_angle(&stock, landed), Some(0));
    }

    #[rstest]
    fn same_inputs_same_result(stock: Vec<Outcome>) {
        let params = SelectorParams::default();
        let a = select_winner(&stock, 1234.5, draw(61.7), &params);
        let b = select_winner(&stock, 1234.5, draw(61.7), &params);
        assert_eq!(a, b);
    }

    // Over many random draws and chained spins, every winner contains its
    // draw, every rotation moves forward, and the landing point lies in the
    // winner's arc.
    #[rstest]
    fn repeated_spins_hold_invariants(stock: Vec<Outcome>) {
        let params = SelectorParams::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut rotation = 0.0;

        for _ in 0..2000 {
            let d = Draw::sample(&mut rng);
            let selection = select_winner(&stock, rotation, d, &params).unwrap();

            let start = cumulative_before(&stock, selection.winner);
            let end = start + stock[selection.winner].weight();
            assert!(start <= d.value() && d.value() < end);

            assert!(selection.target_rotation > rotation);

            let arc = arc_of(&stock, selection.winner);
            let landed = angle_under_pointer(selection.target_rotation);
            if arc.width() < 2.0 * params.edge_margin_deg {
                assert!((landed - arc.midpoint()).abs() < 1e-6);
            } else {
                assert!(landed >= arc.start + params.edge_margin_deg - 1e-6);
                assert!(landed <= arc.end - params.edge_margin_deg + 1e-6);
            }

            rotation = selection.target_rotation;
        }
    }

    // The 1% sector is narrower than twice the margin, so it always lands
    // on its midpoint.
    #[rstest]
    fn narrow_sector_lands_on_midpoint(stock: Vec<Outcome>) {
        let selection = select_winner(&stock, 0.0, draw(85.2), &SelectorParams::default()).unwrap();
        assert_eq!(selection.winner, 6);
        assert!((selection.target_angle - arc_of(&stock, 6).midpoint()).abs() < 1e-9);
    }

    // -- validate --

    #[rstest]
    fn stock_set_is_valid(stock: Vec<Outcome>) {
        assert!(validate(&stock).is_ok());
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::under(&[50.0, 40.0])]
    #[case::over(&[60.0, 41.0])]
    #[case::all_zero(&[0.0, 0.0])]
    #[case::negative(&[110.0, -10.0])]
    #[case::nan(&[f64::NAN, 100.0])]
    fn invalid_sets_are_rejected(#[case] weights: &[f64]) {
        assert!(validate(&outcomes(weights)).is_err());
    }
}
