// @generated by fire-params from namespace `vehicle.dynamics`. Do not edit.

pub mod vehicle {
    pub mod dynamics {
        /// Maximum velocity the vehicle is allowed to reach - Unit: m/s
        #[allow(non_upper_case_globals)]
        pub const maximum_vehicle_velocity: f64 = 55.0;

        /// Number of wheels on the vehicle
        #[allow(non_upper_case_globals)]
        pub const wheel_count: i64 = 4;

        /// Vehicle identifier
        #[allow(non_upper_case_globals)]
        pub const vehicle_name: &str = "TestVehicle";

        /// Enable debug output
        #[allow(non_upper_case_globals)]
        pub const debug_mode: bool = false;

        /// One row of [`braking_distance_table`].
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct BrakingDistanceTableRow {
            /// Unit: m/s
            pub velocity: f64,
            pub friction_coefficient: f64,
            /// Unit: m
            pub braking_distance: f64,
        }

        #[allow(non_upper_case_globals)]
        pub const braking_distance_table_size: usize = 6;

        /// Braking distance by velocity and road friction
        #[allow(non_upper_case_globals)]
        pub const braking_distance_table: [BrakingDistanceTableRow; braking_distance_table_size] = [
            BrakingDistanceTableRow { velocity: 10.0, friction_coefficient: 0.7, braking_distance: 7.1 },
            BrakingDistanceTableRow { velocity: 15.0, friction_coefficient: 0.65, braking_distance: 17.6 },
            BrakingDistanceTableRow { velocity: 20.0, friction_coefficient: 0.6, braking_distance: 34.0 },
            BrakingDistanceTableRow { velocity: 25.0, friction_coefficient: 0.5, braking_distance: 63.7 },
            BrakingDistanceTableRow { velocity: 28.0, friction_coefficient: 0.4, braking_distance: 99.9 },
            BrakingDistanceTableRow { velocity: 30.0, friction_coefficient: 0.3, braking_distance: 150.0 },
        ];
    }
}

pub use vehicle::dynamics::*;

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::bool_assert_comparison)]
mod generated_value_checks {
    use super::*;

    #[test]
    fn values_match_parameter_set() {
        assert_eq!(vehicle::dynamics::maximum_vehicle_velocity, 55.0);
        assert_eq!(vehicle::dynamics::wheel_count, 4);
        assert_eq!(vehicle::dynamics::vehicle_name, "TestVehicle");
        assert_eq!(vehicle::dynamics::debug_mode, false);
        assert_eq!(vehicle::dynamics::braking_distance_table_size, 6);
        assert_eq!(vehicle::dynamics::braking_distance_table.len(), vehicle::dynamics::braking_distance_table_size);
        assert_eq!(vehicle::dynamics::braking_distance_table[0].velocity, 10.0);
        assert_eq!(vehicle::dynamics::braking_distance_table[0].friction_coefficient, 0.7);
        assert_eq!(vehicle::dynamics::braking_distance_table[0].braking_distance, 7.1);
        assert_eq!(vehicle::dynamics::braking_distance_table[1].velocity, 15.0);
        assert_eq!(vehicle::dynamics::braking_distance_table[1].friction_coefficient, 0.65);
        assert_eq!(vehicle::dynamics::braking_distance_table[1].braking_distance, 17.6);
        assert_eq!(vehicle::dynamics::braking_distance_table[2].velocity, 20.0);
        assert_eq!(vehicle::dynamics::braking_distance_table[2].friction_coefficient, 0.6);
        assert_eq!(vehicle::dynamics::braking_distance_table[2].braking_distance, 34.0);
        assert_eq!(vehicle::dynamics::braking_distance_table[3].velocity, 25.0);
        assert_eq!(vehicle::dynamics::braking_distance_table[3].friction_coefficient, 0.5);
        assert_eq!(vehicle::dynamics::braking_distance_table[3].braking_distance, 63.7);
        assert_eq!(vehicle::dynamics::braking_distance_table[4].velocity, 28.0);
        assert_eq!(vehicle::dynamics::braking_distance_table[4].friction_coefficient, 0.4);
        assert_eq!(vehicle::dynamics::braking_distance_table[4].braking_distance, 99.9);
        assert_eq!(vehicle::dynamics::braking_distance_table[5].velocity, 30.0);
        assert_eq!(vehicle::dynamics::braking_distance_table[5].friction_coefficient, 0.3);
        assert_eq!(vehicle::dynamics::braking_distance_table[5].braking_distance, 150.0);
    }
}
