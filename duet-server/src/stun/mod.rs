mod stun_responder;

pub use stun_responder::*;
