#![allow(dead_code)]
use alloy::sol;

sol!(
    #[sol(rpc)]
    contract NftWrapper {
        function name() external view returns (string name);
        function symbol() external view returns (string symbol);
        function addToken(address token) external;
        function removeToken(address token) external;
        function isTokenAllowed(address token) external view returns (bool allowed);
        function wrapTokens(address tokenAddress, uint256 amount) external returns (uint256 tokenId);
        function unwrapTokens(address tokenAddress, uint256 tokenId) external;
        function getWrappedTokenAmount(uint256 tokenId) external view returns (uint256 amount);
        function getWrappedTokenAddress(uint256 tokenId) external view returns (address tokenAddress);
        function balanceOf(address owner) external view returns (uint256 balance);
        function ownerOf(uint256 tokenId) external view returns (address ownerOf);
        function owner() external view returns (address owner);

        error OwnableUnauthorizedAccount(address account);
        error ERC721NonexistentToken(uint256 tokenId);

        #[derive(Debug, PartialEq)]
        event TokenAllowed(address indexed token);
        #[derive(Debug, PartialEq)]
        event TokenDisallowed(address indexed token);
        #[derive(Debug, PartialEq)]
        event TokensWrapped(address indexed tokenAddress, address indexed sender, uint256 amount, uint256 indexed tokenId);
        #[derive(Debug, PartialEq)]
        event TokensUnwrapped(address indexed tokenAddress, address indexed sender, uint256 amount, uint256 indexed tokenId);
        #[derive(Debug, PartialEq)]
        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
    }

    #[sol(rpc)]
    contract MyToken {
        function balanceOf(address account) external view returns (uint256 balance);
        function approve(address spender, uint256 value) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256 allowance);

        error ERC20InsufficientAllowance(address spender, uint256 allowance, uint256 needed);

        #[derive(Debug, PartialEq)]
        event Transfer(address indexed from, address indexed to, uint256 value);
    }
);
