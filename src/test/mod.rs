mod end_to_end;
mod simulator;
mod support;
