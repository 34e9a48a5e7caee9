use tracing::info;

use crate::{
    constants::MAX_TOUCHDOWN_SPEED,
    control::{
        barge::Barge,
        rocket::{CrashReason, Outcome, Rocket},
    },
};

use super::world::World;

/// Inspects a booster after its physics step and records a terminal outcome
/// when one applies. Returns the outcome only on the tick it is recorded.
///
/// Checks run in severity order and the first match wins: leaving the
/// world, tipping past 90°, deck contact, then the sea. Any deck contact
/// with stowed legs ends as a legs crash, however fast it was.
pub fn detect_collision(
    rocket: &mut Rocket,
    barge: &Barge,
    world: &World,
    elapsed: f64,
) -> Option<Outcome> {
    if rocket.is_settled() {
        return None;
    }

    let outcome = classify(rocket, barge, world, elapsed)?;
    if !rocket.settle(outcome) {
        return None;
    }

    match outcome {
        Outcome::Landed { time_to_land } => {
            info!(time_to_land, "booster landed on the barge");
        }
        Outcome::Crashed(reason) => {
            info!(
                %reason,
                x = rocket.kinematics.position.x,
                y = rocket.kinematics.position.y,
                "booster lost"
            );
        }
        Outcome::Flying => {}
    }
    Some(outcome)
}

fn classify(rocket: &mut Rocket, barge: &Barge, world: &World, elapsed: f64) -> Option<Outcome> {
    let position = rocket.kinematics.position;
    let left = position.x;
    let right = position.x + rocket.footprint.width;
    let bottom = position.y + rocket.footprint.height / 2.0;

    if world.is_outside_horizontally(left, rocket.footprint.width) {
        return Some(Outcome::Crashed(CrashReason::LossOfCommunication));
    }
    if world.is_outside_vertically(position.y, bottom) {
        return Some(Outcome::Crashed(CrashReason::LossOfCommunication));
    }
    if rocket.kinematics.get_orientation_degrees().abs() > 90.0 {
        return Some(Outcome::Crashed(CrashReason::AerodynamicBreakup));
    }

    if barge.spans(left, right) {
        if bottom < world.deck_level(barge) {
            return None;
        }
        let velocity = rocket.kinematics.velocity;
        let contact = if velocity.x.abs() > MAX_TOUCHDOWN_SPEED || velocity.y > MAX_TOUCHDOWN_SPEED {
            Outcome::Crashed(CrashReason::BargeImpact)
        } else {
            rocket.absorb_touchdown(barge.velocity);
            Outcome::Landed {
                time_to_land: elapsed,
            }
        };

        // Stowed legs override whatever the contact speed decided.
        if !rocket.legs_deployed() {
            return Some(Outcome::Crashed(CrashReason::LegsNotDeployed));
        }
        return Some(contact);
    }

    if bottom >= world.sea_level() {
        return Some(Outcome::Crashed(CrashReason::Ocean));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        control::{
            environment::Environment,
            rocket::{BodyState, RocketSpec},
        },
        utils::vector2d::Vector2D,
    };
    use approx::assert_relative_eq;

    fn world() -> World {
        World::default()
    }

    fn barge() -> Barge {
        Barge::new(100.0, 5.0, 350.0, 1.5)
    }

    /// Booster whose bottom edge sits `gap` above the deck.
    fn rocket_over_deck(gap: f64, velocity: Vector2D) -> Rocket {
        let mut rocket = Rocket::new(&RocketSpec::default(), 400.0, 0.0, true, Environment::default());
        let bottom = world().deck_level(&barge()) - gap;
        rocket.kinematics.position = Vector2D::new(400.0, bottom - rocket.footprint.height / 2.0);
        rocket.kinematics.velocity = velocity;
        rocket
    }

    #[test]
    fn test_flying_rocket_stays_flying() {
        let mut rocket = rocket_over_deck(200.0, Vector2D::new(0.0, 50.0));
        assert_eq!(detect_collision(&mut rocket, &barge(), &world(), 5.0), None);
        assert_eq!(rocket.get_outcome(), Outcome::Flying);
    }

    #[test]
    fn test_soft_touchdown_with_legs_lands() {
        let mut rocket = rocket_over_deck(-0.5, Vector2D::new(3.0, 8.0));
        rocket.deploy_legs();
        rocket.engine.set_throttle(0.6);

        let outcome = detect_collision(&mut rocket, &barge(), &world(), 12.5);

        assert_eq!(outcome, Some(Outcome::Landed { time_to_land: 12.5 }));
        assert_eq!(rocket.engine.rated_thrust, 0.0);
        assert_relative_eq!(rocket.kinematics.velocity.x, -0.1 * 3.0 + 1.5, epsilon = 1e-12);
        assert_relative_eq!(rocket.kinematics.velocity.y, -0.1 * 8.0, epsilon = 1e-12);
        assert_eq!(rocket.get_body_state(), BodyState::Extended);
    }

    #[test]
    fn test_touchdown_with_stowed_legs_crashes() {
        let mut rocket = rocket_over_deck(-0.5, Vector2D::new(0.0, 5.0));
        let outcome = detect_collision(&mut rocket, &barge(), &world(), 12.5);
        assert_eq!(outcome, Some(Outcome::Crashed(CrashReason::LegsNotDeployed)));
        // The bounce is still applied before the override.
        assert_eq!(rocket.engine.rated_thrust, 0.0);
        assert_relative_eq!(rocket.kinematics.velocity.y, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_hard_touchdown_crashes_into_barge() {
        let mut fast_vertical = rocket_over_deck(-1.0, Vector2D::new(0.0, 15.5));
        fast_vertical.deploy_legs();
        assert_eq!(
            detect_collision(&mut fast_vertical, &barge(), &world(), 1.0),
            Some(Outcome::Crashed(CrashReason::BargeImpact))
        );
        assert_eq!(fast_vertical.engine.rated_thrust, 845_000.0);

        let mut fast_sideways = rocket_over_deck(-1.0, Vector2D::new(-16.0, 2.0));
        fast_sideways.deploy_legs();
        assert_eq!(
            detect_collision(&mut fast_sideways, &barge(), &world(), 1.0),
            Some(Outcome::Crashed(CrashReason::BargeImpact))
        );
    }

    #[test]
    fn test_fast_impact_with_stowed_legs_reports_the_legs() {
        let mut rocket = rocket_over_deck(-0.5, Vector2D::new(0.0, 40.0));
        let outcome = detect_collision(&mut rocket, &barge(), &world(), 6.0);
        assert_eq!(outcome, Some(Outcome::Crashed(CrashReason::LegsNotDeployed)));
        // No touchdown absorption on a hard impact.
        assert_eq!(rocket.engine.rated_thrust, 845_000.0);
        assert_eq!(rocket.kinematics.velocity.y, 40.0);
    }

    #[test]
    fn test_rising_off_the_deck_is_not_an_impact() {
        let mut rocket = rocket_over_deck(-1.0, Vector2D::new(0.0, -40.0));
        rocket.deploy_legs();
        assert!(matches!(
            detect_collision(&mut rocket, &barge(), &world(), 1.0),
            Some(Outcome::Landed { .. })
        ));
    }

    #[test]
    fn test_tilt_beyond_ninety_degrees_breaks_up() {
        for degrees in [90.5_f64, -91.0] {
            let mut rocket = rocket_over_deck(-1.0, Vector2D::new(0.0, 2.0));
            rocket.deploy_legs();
            rocket.kinematics.orientation = degrees.to_radians();
            assert_eq!(
                detect_collision(&mut rocket, &barge(), &world(), 1.0),
                Some(Outcome::Crashed(CrashReason::AerodynamicBreakup))
            );
        }
    }

    #[test]
    fn test_leaving_the_world_loses_communication() {
        let mut rocket = rocket_over_deck(300.0, Vector2D::zero());
        rocket.kinematics.position.x = 1_590.0;
        rocket.kinematics.orientation = 2.0;
        assert_eq!(
            detect_collision(&mut rocket, &barge(), &world(), 1.0),
            Some(Outcome::Crashed(CrashReason::LossOfCommunication))
        );

        let mut above = rocket_over_deck(300.0, Vector2D::zero());
        above.kinematics.position.y = -3.0;
        assert_eq!(
            detect_collision(&mut above, &barge(), &world(), 1.0),
            Some(Outcome::Crashed(CrashReason::LossOfCommunication))
        );
    }

    #[test]
    fn test_missing_the_barge_lands_in_the_ocean() {
        let mut rocket = rocket_over_deck(0.0, Vector2D::new(0.0, 3.0));
        rocket.kinematics.position.x = 700.0;
        rocket.kinematics.position.y = world().sea_level() - rocket.footprint.height / 2.0 + 0.1;
        assert_eq!(
            detect_collision(&mut rocket, &barge(), &world(), 1.0),
            Some(Outcome::Crashed(CrashReason::Ocean))
        );
    }

    #[test]
    fn test_outcome_cannot_be_rewritten() {
        let mut rocket = rocket_over_deck(-0.5, Vector2D::new(0.0, 4.0));
        rocket.deploy_legs();
        let first = detect_collision(&mut rocket, &barge(), &world(), 7.0);
        assert_eq!(first, Some(Outcome::Landed { time_to_land: 7.0 }));

        rocket.kinematics.orientation = 3.0;
        rocket.kinematics.position.x = -50.0;
        assert_eq!(detect_collision(&mut rocket, &barge(), &world(), 8.0), None);
        assert_eq!(rocket.get_outcome(), Outcome::Landed { time_to_land: 7.0 });
    }
}
