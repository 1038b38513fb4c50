//! Minting contract interface

use alloy_sol_types::sol;

sol! {
    interface ILikeMint {
        function getRangeClose(uint256 targetId, uint256 reactorId) external view returns (uint256);
        function getRangeCloseBatch(uint256[] calldata targetIds, uint256[] calldata reactorIds) external view returns (uint256[] memory);

        event Mint(address indexed to, uint256 indexed targetId, uint256 amount);
        event Claim(address indexed to, uint256 indexed reactorId, uint256 amount);
    }
}
