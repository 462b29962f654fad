//! Solidity interfaces spoken by the proxy and the built-in facets.
//!
//! Each interface expands to typed call structs (`SolCall`) and a `*Calls`
//! enum (`SolInterface`) that facets decode inbound arguments into. Encoding
//! follows the Solidity ABI through `alloy-sol-types`.

use alloy_sol_types::sol;

sol! {
    /// EIP-2535 upgrade entry point. `action` is `FacetCutAction` on the wire.
    #[sol(all_derives)]
    interface IDiamondCut {
        struct FacetCut {
            address facetAddress;
            uint8 action;
            bytes4[] functionSelectors;
        }

        function diamondCut(FacetCut[] _diamondCut, address _init, bytes _calldata) external;
    }

    /// EIP-2535 introspection.
    #[sol(all_derives)]
    interface IDiamondLoupe {
        struct Facet {
            address facetAddress;
            bytes4[] functionSelectors;
        }

        function facets() external view returns (Facet[] memory facets_);
        function facetFunctionSelectors(address facet) external view returns (bytes4[] memory selectors_);
        function facetAddresses() external view returns (address[] memory addresses_);
        function facetAddress(bytes4 functionSelector) external view returns (address facet_);
    }

    #[sol(all_derives)]
    interface IERC165 {
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }

    #[sol(all_derives)]
    interface IERC173 {
        function owner() external view returns (address owner_);
        function transferOwnership(address newOwner) external;
    }

    #[sol(all_derives)]
    interface IDiamondInit {
        function init() external;
    }

    /// Shared by the two interchangeable data facets.
    #[sol(all_derives)]
    interface IDataFacet {
        function setDataA(bytes32 dataA) external;
        function getDataA() external view returns (bytes32);
    }

    #[sol(all_derives)]
    interface IHandleRegistry {
        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);

        function mintHandle(address to, string handle) external returns (uint256);
        function getTokenId(string handle) external view returns (uint256);
        function getLocalName(uint256 tokenId) external view returns (string);
        function ownerOf(uint256 tokenId) external view returns (address);
    }
}
