pub mod color_sampler;
