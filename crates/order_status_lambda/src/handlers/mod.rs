pub mod order_status;
