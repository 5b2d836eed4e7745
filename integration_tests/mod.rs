mod real_backend;
