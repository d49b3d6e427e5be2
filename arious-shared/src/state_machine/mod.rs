pub mod dispatch_state;
