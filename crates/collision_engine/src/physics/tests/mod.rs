//! Scenario tests for the full collision pass

mod collision_scenarios;
