mod config;
mod queues;
mod sampler;
