//! Tests for authentication service


mod sign_up_tests;
