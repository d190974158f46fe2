//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter       | Implements   | Connects to                        |
//! |---------------|--------------|------------------------------------|
//! | `line_reader` | LineSource   | Any `BufRead` (serial node, file)  |
//! | `log_sink`    | EventSink    | `log` facade                       |
//! | `clock`       | —            | Monotonic display tick             |
//! | `stop_input`  | —            | Operator `q` / closed terminal     |

pub mod clock;
pub mod line_reader;
pub mod log_sink;
pub mod stop_input;
