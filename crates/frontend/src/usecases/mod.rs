pub mod u101_send_line_message;
