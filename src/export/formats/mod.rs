pub mod repeat_stats;
