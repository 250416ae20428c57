//! Adapters — concrete implementations of the port traits and the
//! transport boundaries.
//!
//! | Adapter    | Implements / role  | Connects to                     |
//! |------------|--------------------|---------------------------------|
//! | `hardware` | ActuatorPort       | window servo, pump GPIO         |
//! | `log_sink` | EventSink          | `log` facade                    |
//! | `time`     | control clock      | `std::time::Instant`            |
//! | `http`     | payload translation| `/control`, `/data`, backend    |
//! | `bus`      | payload translation| message-bus topics              |
//! | `console`  | host transport     | stdin lines                     |

pub mod bus;
pub mod console;
pub mod hardware;
pub mod http;
pub mod log_sink;
pub mod time;
