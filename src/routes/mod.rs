pub mod genres_list_route;
pub mod robot_route;
