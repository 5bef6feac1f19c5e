pub mod brute_force;
