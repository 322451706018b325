mod spotify_auth;
pub(crate) use spotify_auth::*;

mod spotify_client;
pub(crate) use spotify_client::*;

mod ytdlp;
pub(crate) use ytdlp::*;

mod operator_prompt;
pub(crate) use operator_prompt::*;
