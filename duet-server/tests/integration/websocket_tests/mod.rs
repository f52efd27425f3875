mod test_ws_signaling_flow;
