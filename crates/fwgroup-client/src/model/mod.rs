// Model types for Inventory responses and ChangeDesk tickets

pub mod inventory;
pub mod member;
pub mod ticket;

pub use inventory::{
    Device, DeviceList, DevicesResult, NetworkObject, NetworkObjectList, NetworkObjectMember,
    NetworkObjectsResult,
};
pub use member::GroupMember;
pub use ticket::{
    ChangeAction, Field, Fields, GroupChange, MemberStatus, MemberType, Members,
    ObjectUpdatedStatus, Step, Steps, Task, Tasks, Ticket, TicketEnvelope, TicketMember,
    Workflow,
};
