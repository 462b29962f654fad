mod cli;
mod cut;
mod dispatch;
mod handles;
