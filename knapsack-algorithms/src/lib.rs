pub mod knapsack;
