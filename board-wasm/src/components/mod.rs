pub(crate) mod board_screen;
pub(crate) mod compose_screen;
pub(crate) mod login_screen;
pub(crate) mod nav_bar;
