#![allow(dead_code)]
use alloy::sol;

sol!(
    #[sol(rpc)]
    contract TokenWrapper {
        function router() external view returns (address router);
        function setRouter(address newRouter) external;
        function owner() external view returns (address owner);
        function transferOwnership(address newOwner) external;
        function renounceOwnership() external;

        error OwnableUnauthorizedAccount(address account);
        error OwnableInvalidOwner(address owner);

        #[derive(Debug, PartialEq)]
        event RouterUpdated(address indexed previousRouter, address indexed newRouter);
        #[derive(Debug, PartialEq)]
        event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);
    }
);
