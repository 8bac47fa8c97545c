mod add_snippet;
mod completion;
mod rebuild;
mod registration;
mod watch;
