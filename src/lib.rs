pub mod game;
pub mod instrument;
pub mod minimax;
pub mod prelude;
pub mod render;
pub mod search_tree;
pub mod tictactoe;
