use ethers::prelude::*;

// JSON ABI: the human-readable parser cannot expand tuple array arguments.
abigen!(
    IBalancerV2Vault,
    r#"[
        {
            "type": "function",
            "name": "batchSwap",
            "stateMutability": "payable",
            "inputs": [
                { "name": "kind", "type": "uint8" },
                {
                    "name": "swaps",
                    "type": "tuple[]",
                    "components": [
                        { "name": "poolId", "type": "bytes32" },
                        { "name": "assetInIndex", "type": "uint256" },
                        { "name": "assetOutIndex", "type": "uint256" },
                        { "name": "amount", "type": "uint256" },
                        { "name": "userData", "type": "bytes" }
                    ]
                },
                { "name": "assets", "type": "address[]" },
                {
                    "name": "funds",
                    "type": "tuple",
                    "components": [
                        { "name": "sender", "type": "address" },
                        { "name": "fromInternalBalance", "type": "bool" },
                        { "name": "recipient", "type": "address" },
                        { "name": "toInternalBalance", "type": "bool" }
                    ]
                },
                { "name": "limits", "type": "int256[]" },
                { "name": "deadline", "type": "uint256" }
            ],
            "outputs": [
                { "name": "assetDeltas", "type": "int256[]" }
            ]
        },
        {
            "type": "function",
            "name": "queryBatchSwap",
            "stateMutability": "nonpayable",
            "inputs": [
                { "name": "kind", "type": "uint8" },
                {
                    "name": "swaps",
                    "type": "tuple[]",
                    "components": [
                        { "name": "poolId", "type": "bytes32" },
                        { "name": "assetInIndex", "type": "uint256" },
                        { "name": "assetOutIndex", "type": "uint256" },
                        { "name": "amount", "type": "uint256" },
                        { "name": "userData", "type": "bytes" }
                    ]
                },
                { "name": "assets", "type": "address[]" },
                {
                    "name": "funds",
                    "type": "tuple",
                    "components": [
                        { "name": "sender", "type": "address" },
                        { "name": "fromInternalBalance", "type": "bool" },
                        { "name": "recipient", "type": "address" },
                        { "name": "toInternalBalance", "type": "bool" }
                    ]
                }
            ],
            "outputs": [
                { "name": "assetDeltas", "type": "int256[]" }
            ]
        },
        {
            "type": "function",
            "name": "getPoolTokens",
            "stateMutability": "view",
            "inputs": [
                { "name": "poolId", "type": "bytes32" }
            ],
            "outputs": [
                { "name": "tokens", "type": "address[]" },
                { "name": "balances", "type": "uint256[]" },
                { "name": "lastChangeBlock", "type": "uint256" }
            ]
        }
    ]"#
);
