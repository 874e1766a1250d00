// @generated by fire-params from namespace `vehicle.dynamics`. Do not edit.

/// Maximum velocity the vehicle is allowed to reach - Unit: m/s
pub const MAXIMUM_VEHICLE_VELOCITY: f64 = 55.0;

/// Number of wheels on the vehicle
pub const WHEEL_COUNT: i64 = 4;

/// Vehicle identifier
pub const VEHICLE_NAME: &str = "TestVehicle";

/// Enable debug output
pub const DEBUG_MODE: bool = false;

/// One row of [`BRAKING_DISTANCE_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrakingDistanceTableRow {
    /// Unit: m/s
    pub velocity: f64,
    pub friction_coefficient: f64,
    /// Unit: m
    pub braking_distance: f64,
}

pub const BRAKING_DISTANCE_TABLE_SIZE: usize = 6;

/// Braking distance by velocity and road friction
pub const BRAKING_DISTANCE_TABLE: [BrakingDistanceTableRow; BRAKING_DISTANCE_TABLE_SIZE] = [
    BrakingDistanceTableRow { velocity: 10.0, friction_coefficient: 0.7, braking_distance: 7.1 },
    BrakingDistanceTableRow { velocity: 15.0, friction_coefficient: 0.65, braking_distance: 17.6 },
    BrakingDistanceTableRow { velocity: 20.0, friction_coefficient: 0.6, braking_distance: 34.0 },
    BrakingDistanceTableRow { velocity: 25.0, friction_coefficient: 0.5, braking_distance: 63.7 },
    BrakingDistanceTableRow { velocity: 28.0, friction_coefficient: 0.4, braking_distance: 99.9 },
    BrakingDistanceTableRow { velocity: 30.0, friction_coefficient: 0.3, braking_distance: 150.0 },
];

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::bool_assert_comparison)]
mod generated_value_checks {
    use super::*;

    #[test]
    fn values_match_parameter_set() {
        assert_eq!(MAXIMUM_VEHICLE_VELOCITY, 55.0);
        assert_eq!(WHEEL_COUNT, 4);
        assert_eq!(VEHICLE_NAME, "TestVehicle");
        assert_eq!(DEBUG_MODE, false);
        assert_eq!(BRAKING_DISTANCE_TABLE_SIZE, 6);
        assert_eq!(BRAKING_DISTANCE_TABLE.len(), BRAKING_DISTANCE_TABLE_SIZE);
        assert_eq!(BRAKING_DISTANCE_TABLE[0].velocity, 10.0);
        assert_eq!(BRAKING_DISTANCE_TABLE[0].friction_coefficient, 0.7);
        assert_eq!(BRAKING_DISTANCE_TABLE[0].braking_distance, 7.1);
        assert_eq!(BRAKING_DISTANCE_TABLE[1].velocity, 15.0);
        assert_eq!(BRAKING_DISTANCE_TABLE[1].friction_coefficient, 0.65);
        assert_eq!(BRAKING_DISTANCE_TABLE[1].braking_distance, 17.6);
        assert_eq!(BRAKING_DISTANCE_TABLE[2].velocity, 20.0);
        assert_eq!(BRAKING_DISTANCE_TABLE[2].friction_coefficient, 0.6);
        assert_eq!(BRAKING_DISTANCE_TABLE[2].braking_distance, 34.0);
        assert_eq!(BRAKING_DISTANCE_TABLE[3].velocity, 25.0);
        assert_eq!(BRAKING_DISTANCE_TABLE[3].friction_coefficient, 0.5);
        assert_eq!(BRAKING_DISTANCE_TABLE[3].braking_distance, 63.7);
        assert_eq!(BRAKING_DISTANCE_TABLE[4].velocity, 28.0);
        assert_eq!(BRAKING_DISTANCE_TABLE[4].friction_coefficient, 0.4);
        assert_eq!(BRAKING_DISTANCE_TABLE[4].braking_distance, 99.9);
        assert_eq!(BRAKING_DISTANCE_TABLE[5].velocity, 30.0);
        assert_eq!(BRAKING_DISTANCE_TABLE[5].friction_coefficient, 0.3);
        assert_eq!(BRAKING_DISTANCE_TABLE[5].braking_distance, 150.0);
    }
}
