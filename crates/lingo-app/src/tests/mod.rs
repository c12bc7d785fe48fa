mod practice_tests;
mod profile_tests;
