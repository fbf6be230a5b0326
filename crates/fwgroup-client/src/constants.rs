// API paths and fixed ticket literals for Inventory and ChangeDesk

pub mod api_path {
    // Context paths appended to each service origin
    pub const INVENTORY_CONTEXT: &str = "/securetrack/api";
    pub const CHANGE_DESK_CONTEXT: &str = "/securechangeworkflow/api";

    // Inventory
    pub const NETWORK_OBJECT_SEARCH: &str = "/network_objects/search.json";
    pub const DEVICES: &str = "/devices.json";

    // ChangeDesk
    pub const TICKETS: &str = "/securechange/tickets.json";
}

pub mod ticket {
    pub const PRIORITY_NORMAL: &str = "Normal";

    pub const DEFAULT_WORKFLOW_ID: i64 = 34;
    pub const DEFAULT_WORKFLOW_NAME: &str = "Group Change Template";

    pub const STEP_NAME: &str = "Submit network object group request";

    pub const FIELD_XSI_TYPE: &str = "multi_group_change";
    pub const FIELD_NAME: &str = "Modify network object group";

    pub const GROUP_CHANGE_XSI_TYPE: &str = "group_change";
    pub const MEMBER_XSI_TYPE: &str = "groupMemberNetworkObjectDTO";

    pub const HOST_NETMASK: &str = "255.255.255.255";
    pub const OBJECT_TYPE_HOST: &str = "Host";

    // A group cannot be created empty; this link-local host seeds it
    pub const PLACEHOLDER_MEMBER: &str = "169.254.255.255";
}
