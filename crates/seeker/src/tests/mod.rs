mod condition_tests;
mod policy_tests;
mod position_tests;
