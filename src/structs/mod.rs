pub mod genre;
pub mod robot;
pub mod sorting_and_order_arguments;
