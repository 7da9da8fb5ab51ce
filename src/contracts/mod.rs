// Contracts Module - Public ABIs Only

pub mod i_balancer_v2_vault;

pub use i_balancer_v2_vault::IBalancerV2Vault;
