mod logger;
mod models;
mod real;
