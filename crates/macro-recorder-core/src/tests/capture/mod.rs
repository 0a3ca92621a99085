mod listener;
mod recorder;
