mod state;

pub use state::{DEFAULT_CHAR_LIMIT, DEFAULT_WIDTH, InputView, TextInput};
