mod storage_properties;
